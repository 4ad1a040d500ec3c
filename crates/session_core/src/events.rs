//! Declarative tile-event engine.
//!
//! Events are authored in map documents and evaluated against the player's
//! flag store. Evaluation either fails closed (spent once-events), fails
//! with a message (condition mismatch, no mutation), or applies the
//! type-specific effect and reports success.

use crate::entity::Player;
use data_runtime::map::{EventKind, EventSpec, WarpSpec};
use grid_core::{GridPos, MapGrid, TileKind};

/// Runtime wrapper over the authored event: the spec plus the spent marker.
#[derive(Debug, Clone)]
pub struct GameEvent {
    pub spec: EventSpec,
    pub executed: bool,
}

impl GameEvent {
    #[must_use]
    pub fn new(spec: EventSpec) -> Self {
        Self {
            spec,
            executed: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.spec.x, self.spec.z)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Spent once-event: no message, no mutation.
    Inert,
    /// Condition mismatch: failure message, no mutation.
    Failed { message: Option<String> },
    Applied {
        message: Option<String>,
        /// Present when a warp event requests a map transition.
        warp: Option<WarpSpec>,
    },
}

/// First event bound to the cell. Cells are expected to hold at most one.
#[must_use]
pub fn event_index_at(events: &[GameEvent], pos: GridPos) -> Option<usize> {
    events.iter().position(|e| e.pos() == pos)
}

/// Evaluate one event against the player and the live tile grid.
///
/// A once-event that already succeeded is inert forever. Condition checks
/// compare the player's flag store against the authored expectation and
/// mutate nothing on mismatch.
pub fn evaluate(ev: &mut GameEvent, player: &mut Player, grid: &mut MapGrid) -> EventOutcome {
    if ev.spec.once && ev.executed {
        return EventOutcome::Inert;
    }
    if let Some(cond) = &ev.spec.condition {
        if !player.flags.check(&cond.flag, &cond.value) {
            return EventOutcome::Failed {
                message: ev.spec.failure.clone(),
            };
        }
    }
    let mut warp = None;
    match ev.spec.kind {
        EventKind::Heal => {
            player.stats.hp = player.stats.max_hp;
        }
        EventKind::SetFlag => {
            if let Some(action) = &ev.spec.action {
                player.flags.set(&action.flag, &action.value);
            }
        }
        EventKind::OpenDoor => {
            // Rewrites the persistent tile grid at the event's own cell.
            grid.set_tile(ev.pos(), TileKind::Floor);
        }
        EventKind::Warp => {
            warp = ev.spec.warp_to.clone();
        }
        EventKind::Notice => {}
    }
    if ev.spec.once {
        ev.executed = true;
    }
    EventOutcome::Applied {
        message: ev.spec.message.clone(),
        warp,
    }
}
