//! Player document supplied by the persistence layer at session start.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    /// Visual asset url; load failure degrades to a placeholder.
    #[serde(default)]
    pub asset: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_next_xp")]
    pub next_xp: u32,
}

fn default_level() -> u32 {
    1
}

fn default_next_xp() -> u32 {
    100
}
