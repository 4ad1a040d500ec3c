//! Data loaders: resolve documents under the workspace `data/` directory.

use crate::enemy::EnemyTable;
use crate::map::MapSpec;
use crate::player::PlayerSpec;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn data_root() -> PathBuf {
    // Prefer the top-level workspace `data/` so tests and tools can run from
    // any crate.
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Read a raw JSON file under `data/` and return its string.
pub fn read_json(rel: impl AsRef<Path>) -> Result<String> {
    let path = data_root().join(rel);
    let s = fs::read_to_string(&path).with_context(|| format!("read data: {}", path.display()))?;
    Ok(s)
}

/// Load and deserialize the player document (data/player.json).
pub fn load_player_spec(rel: impl AsRef<Path>) -> Result<PlayerSpec> {
    let txt = read_json(rel)?;
    let spec: PlayerSpec = serde_json::from_str(&txt).context("parse player json")?;
    Ok(spec)
}

/// Load and deserialize a map document (data/maps/*).
pub fn load_map_spec(rel: impl AsRef<Path>) -> Result<MapSpec> {
    let txt = read_json(rel)?;
    let spec: MapSpec = serde_json::from_str(&txt).context("parse map json")?;
    Ok(spec)
}

/// Load the enemy master table (data/enemies.json).
pub fn load_enemy_table(rel: impl AsRef<Path>) -> Result<EnemyTable> {
    let txt = read_json(rel)?;
    let table: EnemyTable = serde_json::from_str(&txt).context("parse enemy table json")?;
    Ok(table)
}
