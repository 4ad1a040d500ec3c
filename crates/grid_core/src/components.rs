//! Core component types: cell coordinates, tiles, stats, progression, flags.

use glam::Vec3;
use std::collections::HashMap;

/// Integer cell coordinate on the map grid. World position is a scalar
/// multiple of these coordinates (see [`GridPos::world`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub z: i32,
}

impl GridPos {
    #[inline]
    #[must_use]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    #[must_use]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// World-space position of the cell center (y = 0).
    #[inline]
    #[must_use]
    pub fn world(self, tile_m: f32) -> Vec3 {
        Vec3::new(self.x as f32 * tile_m, 0.0, self.z as f32 * tile_m)
    }

    /// 4-neighborhood adjacency: exactly one step apart on one axis.
    #[must_use]
    pub fn adjacent(self, other: GridPos) -> bool {
        let dx = (self.x - other.x).abs();
        let dz = (self.z - other.z).abs();
        (dx == 1 && dz == 0) || (dx == 0 && dz == 1)
    }
}

/// Tile codes as stored in map documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Floor,
    Wall,
    Water,
}

impl TileKind {
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Floor),
            1 => Some(Self::Wall),
            2 => Some(Self::Water),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Floor => 0,
            Self::Wall => 1,
            Self::Water => 2,
        }
    }

    /// Walls block movement; floor and water are walkable.
    #[inline]
    #[must_use]
    pub fn blocks(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Combat stats shared by player and enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Stats {
    #[inline]
    #[must_use]
    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    #[inline]
    pub fn clamp(&mut self) {
        if self.hp > self.max_hp {
            self.hp = self.max_hp;
        }
        if self.hp < 0 {
            self.hp = 0;
        }
    }
}

/// Player progression: level and experience thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level: u32,
    pub xp: u32,
    pub next_xp: u32,
}

/// Session-local flag store driving conditional events. Keys and values are
/// plain strings as authored in map documents.
#[derive(Debug, Clone, Default)]
pub struct Flags(HashMap<String, String>);

impl Flags {
    pub fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// True iff the flag is present with exactly this value.
    #[must_use]
    pub fn check(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }
}
