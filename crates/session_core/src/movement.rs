//! Grid movement, rotation smoothing, facing and proximity helpers.
//!
//! Logical cell position commits synchronously when a step is accepted; the
//! visual world position interpolates toward it every tick and reports
//! arrival once within epsilon. Arrival is the hook for touch events and
//! encounter checks.

use crate::entity::{Npc, NpcId};
use data_runtime::configs::session::SessionTuning;
use glam::Vec3;
use grid_core::{GridPos, MapGrid};

/// Motion state for one grid-bound entity.
#[derive(Debug, Clone)]
pub struct Mover {
    /// Committed cell. Updated synchronously on an accepted step.
    pub pos: GridPos,
    /// Visual world position, trailing `pos` while a move is in flight.
    pub world: Vec3,
    pub yaw: f32,
    target_yaw: Option<f32>,
    moving: bool,
}

impl Mover {
    #[must_use]
    pub fn new(pos: GridPos, yaw: f32, tile_m: f32) -> Self {
        Self {
            pos,
            world: pos.world(tile_m),
            yaw: wrap_angle(yaw),
            target_yaw: None,
            moving: false,
        }
    }

    /// A move or rotation is still interpolating.
    #[inline]
    #[must_use]
    pub fn in_motion(&self) -> bool {
        self.moving || self.target_yaw.is_some()
    }

    /// Snap instantly to a cell (warp transitions).
    pub fn teleport(&mut self, pos: GridPos, tile_m: f32) {
        self.pos = pos;
        self.world = pos.world(tile_m);
        self.moving = false;
        self.target_yaw = None;
    }

    /// Snap heading instantly (dialog facing).
    pub fn face(&mut self, yaw: f32) {
        self.yaw = wrap_angle(yaw);
        self.target_yaw = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Started,
    Blocked,
}

/// Forward offset of a heading, rounded onto the four grid axes.
#[must_use]
pub fn facing_offset(yaw: f32) -> (i32, i32) {
    let (s, c) = yaw.sin_cos();
    (
        (s.round() as i32).clamp(-1, 1),
        (c.round() as i32).clamp(-1, 1),
    )
}

/// The cell one step ahead along the current heading.
#[must_use]
pub fn facing_cell(pos: GridPos, yaw: f32) -> GridPos {
    let (dx, dz) = facing_offset(yaw);
    pos.offset(dx, dz)
}

/// Heading that looks from one cell toward another.
#[must_use]
pub fn yaw_toward(from: GridPos, to: GridPos) -> f32 {
    ((to.x - from.x) as f32).atan2((to.z - from.z) as f32)
}

/// Attempt a single forward step. Rejections are silent no-ops: out of
/// bounds, wall tiles, NPC-occupied cells, or motion already in progress.
pub fn try_step(m: &mut Mover, grid: &MapGrid, npcs: &[Npc]) -> StepOutcome {
    if m.in_motion() {
        return StepOutcome::Blocked;
    }
    let target = facing_cell(m.pos, m.yaw);
    if grid.is_blocked(target) {
        return StepOutcome::Blocked;
    }
    if npcs.iter().any(|n| n.pos == target) {
        return StepOutcome::Blocked;
    }
    m.pos = target;
    m.moving = true;
    StepOutcome::Started
}

/// Request a quarter turn. Rejected while a move or rotation is in flight.
pub fn turn(m: &mut Mover, left: bool) -> bool {
    if m.in_motion() {
        return false;
    }
    let quarter = std::f32::consts::FRAC_PI_2;
    let delta = if left { quarter } else { -quarter };
    m.target_yaw = Some(wrap_angle(m.yaw + delta));
    true
}

/// Advance rotation then translation. Returns the arrival cell when a move
/// completes this tick.
pub fn update(m: &mut Mover, t: &SessionTuning, dt: f32) -> Option<GridPos> {
    if let Some(target) = m.target_yaw {
        let diff = wrap_angle(target - m.yaw);
        let step = t.turn_speed_rad_per_s * dt;
        if diff.abs() <= step {
            m.yaw = target;
            m.target_yaw = None;
        } else {
            m.yaw = wrap_angle(m.yaw + step * diff.signum());
        }
        return None;
    }
    if m.moving {
        let target = m.pos.world(t.tile_m);
        let to = target - m.world;
        let dist = to.length();
        let step = t.move_speed_mps * dt;
        if dist <= t.arrive_epsilon_m || step >= dist {
            m.world = target;
            m.moving = false;
            return Some(m.pos);
        }
        m.world += to / dist * step;
    }
    None
}

/// Index of the first NPC adjacent (4-neighborhood) to `pos`, skipping the
/// suppressed one. Suppression keeps a just-closed dialog from reopening
/// while the player still stands next to that NPC.
#[must_use]
pub fn adjacent_npc(pos: GridPos, npcs: &[Npc], suppressed: Option<NpcId>) -> Option<usize> {
    npcs.iter()
        .position(|n| pos.adjacent(n.pos) && Some(n.id) != suppressed)
}

fn wrap_angle(a: f32) -> f32 {
    let mut x = a;
    while x > std::f32::consts::PI {
        x -= std::f32::consts::TAU;
    }
    while x < -std::f32::consts::PI {
        x += std::f32::consts::TAU;
    }
    x
}
