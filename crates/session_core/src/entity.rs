//! Runtime entity state assembled from the session-start documents.

use crate::events::GameEvent;
use crate::movement::Mover;
use crate::scene::VisualHandle;
use data_runtime::enemy::EnemySpec;
use data_runtime::map::NpcSpec;
use data_runtime::player::PlayerSpec;
use grid_core::{Flags, GridPos, Progress, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NpcId(pub u32);

/// The player: created once per session, never destroyed.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub stats: Stats,
    pub progress: Progress,
    pub mover: Mover,
    pub flags: Flags,
    pub visual: Option<VisualHandle>,
}

impl Player {
    #[must_use]
    pub fn from_spec(spec: &PlayerSpec, start: GridPos, heading: f32, tile_m: f32) -> Self {
        let mut stats = Stats {
            hp: spec.hp,
            max_hp: spec.max_hp,
            attack: spec.attack,
            defense: spec.defense,
        };
        stats.clamp();
        Self {
            name: spec.name.clone(),
            stats,
            progress: Progress {
                level: spec.level,
                xp: spec.xp,
                next_xp: spec.next_xp,
            },
            mover: Mover::new(start, heading, tile_m),
            flags: Flags::default(),
            visual: None,
        }
    }
}

/// Map-static NPC: blocks movement, talks when adjacent.
#[derive(Debug, Clone)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub pos: GridPos,
    pub yaw: f32,
    pub lines: Vec<String>,
    /// Evaluated when a dialog with this NPC closes.
    pub talk_event: Option<GameEvent>,
    pub visual: Option<VisualHandle>,
}

impl Npc {
    #[must_use]
    pub fn from_spec(id: NpcId, spec: &NpcSpec) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            pos: GridPos::new(spec.x, spec.z),
            yaw: 0.0,
            lines: spec.lines.clone(),
            talk_event: spec.talk_event.clone().map(GameEvent::new),
            visual: None,
        }
    }
}

/// Battle-ephemeral enemy instantiated from the master table.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub stats: Stats,
    pub exp: u32,
    pub visual: Option<VisualHandle>,
}

impl Enemy {
    #[must_use]
    pub fn from_spec(spec: &EnemySpec) -> Self {
        Self {
            name: spec.name.clone(),
            level: spec.level,
            stats: Stats {
                hp: spec.hp,
                max_hp: spec.hp,
                attack: spec.attack,
                defense: spec.defense,
            },
            exp: spec.exp,
            visual: None,
        }
    }
}
