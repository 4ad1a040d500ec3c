//! Mutable tile grid for one loaded map.
//!
//! The grid is authoritative for walkability. Door events rewrite tiles in
//! place, so the change persists for the rest of the session.

use crate::components::{GridPos, TileKind};
use anyhow::{Result, ensure};

#[derive(Debug, Clone)]
pub struct MapGrid {
    width: i32,
    height: i32,
    tiles: Vec<u8>,
}

impl MapGrid {
    /// Build a grid from row-major tile codes (`rows[z][x]`).
    pub fn from_rows(width: u32, height: u32, rows: &[Vec<u8>]) -> Result<Self> {
        ensure!(width > 0 && height > 0, "map dimensions must be non-zero");
        ensure!(
            rows.len() == height as usize,
            "tile rows {} != height {}",
            rows.len(),
            height
        );
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for (z, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == width as usize,
                "row {} has {} tiles, expected {}",
                z,
                row.len(),
                width
            );
            for (x, &code) in row.iter().enumerate() {
                ensure!(
                    TileKind::from_code(code).is_some(),
                    "unknown tile code {} at ({}, {})",
                    code,
                    x,
                    z
                );
                tiles.push(code);
            }
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
            tiles,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.z >= 0 && pos.z < self.height
    }

    #[must_use]
    pub fn tile(&self, pos: GridPos) -> Option<TileKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        TileKind::from_code(self.tiles[(pos.z * self.width + pos.x) as usize])
    }

    /// True when the cell cannot be entered: out of bounds or a wall.
    #[must_use]
    pub fn is_blocked(&self, pos: GridPos) -> bool {
        match self.tile(pos) {
            Some(t) => t.blocks(),
            None => true,
        }
    }

    /// Rewrite one tile. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, pos: GridPos, kind: TileKind) {
        if self.in_bounds(pos) {
            self.tiles[(pos.z * self.width + pos.x) as usize] = kind.code();
        }
    }
}
