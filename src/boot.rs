//! Session boot: load the three documents plus tuning and build a session.

use anyhow::{Context, Result};
use data_runtime::{configs, loader};
use session_core::scene::SceneService;
use session_core::session::Session;

/// Load `data/player.json`, `data/maps/<map>.json`, `data/enemies.json` and
/// the tuning config, then construct the session. Missing or malformed
/// documents are fatal: no partial session is allowed to run.
pub fn load_session(map: &str, seed: u64, scene: &mut dyn SceneService) -> Result<Session> {
    let tuning = configs::session::load_default().context("load session tuning")?;
    let player = loader::load_player_spec("player.json").context("load player document")?;
    let map_spec =
        loader::load_map_spec(format!("maps/{map}.json")).context("load map document")?;
    let enemies = loader::load_enemy_table("enemies.json").context("load enemy table")?;
    Session::new(&player, &map_spec, enemies, tuning, seed, scene)
}
