//! ux_hud: HUD logic/state with simple toggles.
//!
//! Owns runtime HUD switches and the last status values pushed out of the
//! session, producing lightweight data a renderer UI module can consume.
//! Implements the session's presenter seam; the core never reads back.

use grid_core::GridPos;
use session_core::present::Presenter;

const LOG_CAP: usize = 50;

#[derive(Debug, Clone)]
pub struct HudModel {
    hud_enabled: bool,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub player_level: u32,
    pub player_pos: Option<GridPos>,
    pub enemy: Option<(String, i32, i32)>,
    pub dialog: Option<(String, String)>,
    pub battle_active: bool,
    log: Vec<String>,
    pub last_notice: Option<String>,
}

impl Default for HudModel {
    fn default() -> Self {
        Self {
            hud_enabled: true,
            player_hp: 0,
            player_max_hp: 0,
            player_level: 0,
            player_pos: None,
            enemy: None,
            dialog: None,
            battle_active: false,
            log: Vec::new(),
            last_notice: None,
        }
    }
}

impl HudModel {
    pub fn toggle_hud(&mut self) {
        self.hud_enabled = !self.hud_enabled;
    }

    #[must_use]
    pub fn hud_enabled(&self) -> bool {
        self.hud_enabled
    }

    /// Recent combat log lines, oldest first.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// One-line status summary for text frontends.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.enemy {
            Some((name, hp, max)) => format!(
                "HP {}/{} L{} | {} {}/{}",
                self.player_hp, self.player_max_hp, self.player_level, name, hp, max
            ),
            None => format!(
                "HP {}/{} L{}",
                self.player_hp, self.player_max_hp, self.player_level
            ),
        }
    }
}

impl Presenter for HudModel {
    fn player_status(&mut self, hp: i32, max_hp: i32, level: u32, pos: GridPos) {
        self.player_hp = hp;
        self.player_max_hp = max_hp;
        self.player_level = level;
        self.player_pos = Some(pos);
    }

    fn enemy_status(&mut self, name: &str, hp: i32, max_hp: i32) {
        self.enemy = Some((name.to_string(), hp, max_hp));
    }

    fn battle_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > LOG_CAP {
            self.log.remove(0);
        }
    }

    fn battle_begin(&mut self, _enemy_name: &str) {
        self.battle_active = true;
    }

    fn battle_end(&mut self) {
        self.battle_active = false;
        self.enemy = None;
    }

    fn show_dialog(&mut self, speaker: &str, line: &str) {
        self.dialog = Some((speaker.to_string(), line.to_string()));
    }

    fn hide_dialog(&mut self) {
        self.dialog = None;
    }

    fn notice(&mut self, message: &str) {
        self.last_notice = Some(message.to_string());
    }
}
