//! session_core: the session state machine.
//!
//! Owns the mutually-exclusive Explore/Battle modes, grid movement and
//! proximity, the declarative tile-event engine, dialog flow, and the
//! turn-based battle resolver with phase-epoch timers. Presentation and
//! asset loading stay behind the `present` and `scene` seams; document
//! schemas come from `data_runtime`.

pub mod battle;
pub mod dialog;
pub mod entity;
pub mod events;
pub mod input;
pub mod movement;
pub mod present;
pub mod scene;
pub mod schedule;
pub mod session;

pub use battle::{Battle, BattleCommand, BattleOutcome, BattlePhase};
pub use entity::{Enemy, Npc, NpcId, Player};
pub use input::InputState;
pub use present::Presenter;
pub use scene::{SceneService, VisualHandle};
pub use session::{CameraFocus, Mode, Session};
