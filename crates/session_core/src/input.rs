//! Input snapshot for one frame of local player intent.

/// Per-frame input flags sampled by the orchestrator.
///
/// Held flags (`forward`, `turn_*`) reflect key state; `*_pressed` flags are
/// one-shot: the host sets them on key-press and clears them after passing
/// the snapshot to `Session::tick` so holding a key does not repeat the
/// action.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputState {
    pub forward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Talk / advance dialog / trigger the facing action event.
    pub interact_pressed: bool,
    pub attack_pressed: bool,
    pub flee_pressed: bool,
    /// Dismisses the level-up cutscene.
    pub confirm_pressed: bool,
}

impl InputState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
