//! Enemy master table: per-id stats used to instantiate battle enemies.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpec {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    /// Experience reward on kill. Unspecified rewards default to 1.
    #[serde(default = "default_exp")]
    pub exp: u32,
    #[serde(default)]
    pub asset: String,
}

fn default_exp() -> u32 {
    1
}

/// Master table keyed by the ids maps reference in their candidate lists.
pub type EnemyTable = HashMap<String, EnemySpec>;
