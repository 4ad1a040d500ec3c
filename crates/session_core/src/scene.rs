//! Asset/scene seam: the session drives visuals through this trait and
//! never touches a scene graph directly.

use std::collections::HashMap;

/// Opaque handle to a loaded visual representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u32);

/// Scene-side operations the session core is allowed to request.
///
/// `load_visual` never errors: a failed load yields `None` and the caller
/// falls back to a placeholder. `play` returns the clip duration in
/// milliseconds (0 when unknown). `stage_center`/`restore` are the level-up
/// cutscene seam: temporarily reparent a visual to the battle stage center
/// (scaled up) and put it back.
pub trait SceneService {
    fn load_visual(&mut self, url: &str) -> Option<VisualHandle>;
    fn play(&mut self, visual: VisualHandle, clip: &str) -> u32;
    fn update(&mut self, visual: VisualHandle, dt: f32);
    fn dispose(&mut self, visual: VisualHandle);
    fn stage_center(&mut self, visual: VisualHandle);
    fn restore(&mut self, visual: VisualHandle);
}

/// Scene service that loads nothing; every entity renders as a placeholder.
#[derive(Default)]
pub struct NullScene;

impl SceneService for NullScene {
    fn load_visual(&mut self, _url: &str) -> Option<VisualHandle> {
        None
    }
    fn play(&mut self, _visual: VisualHandle, _clip: &str) -> u32 {
        0
    }
    fn update(&mut self, _visual: VisualHandle, _dt: f32) {}
    fn dispose(&mut self, _visual: VisualHandle) {}
    fn stage_center(&mut self, _visual: VisualHandle) {}
    fn restore(&mut self, _visual: VisualHandle) {}
}

/// Recording scene for harnesses and tests: hands out sequential handles and
/// replays configured clip durations.
#[derive(Default)]
pub struct RecordingScene {
    next: u32,
    pub durations_ms: HashMap<String, u32>,
    pub played: Vec<(VisualHandle, String)>,
    pub disposed: Vec<VisualHandle>,
    pub staged: Vec<VisualHandle>,
    pub restored: Vec<VisualHandle>,
}

impl SceneService for RecordingScene {
    fn load_visual(&mut self, _url: &str) -> Option<VisualHandle> {
        let h = VisualHandle(self.next);
        self.next += 1;
        Some(h)
    }
    fn play(&mut self, visual: VisualHandle, clip: &str) -> u32 {
        self.played.push((visual, clip.to_string()));
        self.durations_ms.get(clip).copied().unwrap_or(0)
    }
    fn update(&mut self, _visual: VisualHandle, _dt: f32) {}
    fn dispose(&mut self, visual: VisualHandle) {
        self.disposed.push(visual);
    }
    fn stage_center(&mut self, visual: VisualHandle) {
        self.staged.push(visual);
    }
    fn restore(&mut self, visual: VisualHandle) {
        self.restored.push(visual);
    }
}
