//! Session tuning loaded from data/config/session.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// World-space edge length of one grid cell, in meters.
    pub tile_m: f32,
    /// Visual interpolation speed toward the committed cell.
    pub move_speed_mps: f32,
    /// Distance at which a move counts as arrived.
    pub arrive_epsilon_m: f32,
    pub turn_speed_rad_per_s: f32,
    /// Delay before the arrival announcement opens a battle.
    pub intro_delay_ms: u32,
    /// Fixed delay between the player's resolution and the enemy's swing.
    pub turn_delay_ms: u32,
    /// Fraction of the attack animation at which the hit lands.
    pub hit_fraction: f32,
    /// Used when the scene reports no attack clip duration.
    pub default_attack_ms: u32,
    /// Cap on waiting out the enemy death animation.
    pub max_death_wait_ms: u32,
    pub defeat_delay_ms: u32,
    pub flee_delay_ms: u32,
    /// Multiplier applied to next_xp on each level gained.
    pub xp_growth: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            tile_m: 2.0,
            move_speed_mps: 6.0,
            arrive_epsilon_m: 0.05,
            turn_speed_rad_per_s: 6.0,
            intro_delay_ms: 500,
            turn_delay_ms: 400,
            hit_fraction: 0.6,
            default_attack_ms: 800,
            max_death_wait_ms: 1500,
            defeat_delay_ms: 900,
            flee_delay_ms: 600,
            xp_growth: 1.5,
        }
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

pub fn load_default() -> Result<SessionTuning> {
    let path = data_root().join("config/session.toml");
    let mut cfg = if path.is_file() {
        let txt =
            std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str::<SessionTuning>(&txt).context("parse session TOML")?
    } else {
        SessionTuning::default()
    };
    // Env overrides for quick tuning (optional)
    if let Ok(s) = std::env::var("MOVE_SPEED_MPS") {
        if let Ok(v) = s.parse() {
            cfg.move_speed_mps = v;
        }
    }
    if let Ok(s) = std::env::var("XP_GROWTH") {
        if let Ok(v) = s.parse() {
            cfg.xp_growth = v;
        }
    }
    Ok(cfg)
}
