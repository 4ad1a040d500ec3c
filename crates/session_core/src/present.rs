//! HUD/presentation seam. The session pushes status and text out through
//! this trait and never reads back.

use grid_core::GridPos;

pub trait Presenter {
    fn player_status(&mut self, hp: i32, max_hp: i32, level: u32, pos: GridPos);
    fn enemy_status(&mut self, name: &str, hp: i32, max_hp: i32);
    /// One combat log line (arrival, hits, kill, level messages).
    fn battle_log(&mut self, line: String);
    fn battle_begin(&mut self, enemy_name: &str);
    fn battle_end(&mut self);
    fn show_dialog(&mut self, speaker: &str, line: &str);
    fn hide_dialog(&mut self);
    /// Out-of-dialog message (tile event success/failure text).
    fn notice(&mut self, message: &str);
}

/// Presenter that drops everything (headless runs).
#[derive(Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn player_status(&mut self, _hp: i32, _max_hp: i32, _level: u32, _pos: GridPos) {}
    fn enemy_status(&mut self, _name: &str, _hp: i32, _max_hp: i32) {}
    fn battle_log(&mut self, _line: String) {}
    fn battle_begin(&mut self, _enemy_name: &str) {}
    fn battle_end(&mut self) {}
    fn show_dialog(&mut self, _speaker: &str, _line: &str) {}
    fn hide_dialog(&mut self) {}
    fn notice(&mut self, _message: &str) {}
}

/// Recording presenter for harnesses and tests.
#[derive(Default)]
pub struct RecordingPresenter {
    pub log: Vec<String>,
    pub notices: Vec<String>,
    pub dialog: Option<(String, String)>,
    pub battle_active: bool,
    pub last_player: Option<(i32, i32, u32, GridPos)>,
    pub last_enemy: Option<(String, i32, i32)>,
}

impl Presenter for RecordingPresenter {
    fn player_status(&mut self, hp: i32, max_hp: i32, level: u32, pos: GridPos) {
        self.last_player = Some((hp, max_hp, level, pos));
    }
    fn enemy_status(&mut self, name: &str, hp: i32, max_hp: i32) {
        self.last_enemy = Some((name.to_string(), hp, max_hp));
    }
    fn battle_log(&mut self, line: String) {
        self.log.push(line);
    }
    fn battle_begin(&mut self, _enemy_name: &str) {
        self.battle_active = true;
    }
    fn battle_end(&mut self) {
        self.battle_active = false;
    }
    fn show_dialog(&mut self, speaker: &str, line: &str) {
        self.dialog = Some((speaker.to_string(), line.to_string()));
    }
    fn hide_dialog(&mut self) {
        self.dialog = None;
    }
    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
