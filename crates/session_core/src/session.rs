//! Top-level session orchestration.
//!
//! Exactly one of Explore/Battle is active. Explore ticks run in a fixed
//! order: movement integration, input handling, proximity check, animation
//! update. A move completed this tick can trigger touch events and an
//! encounter before the next render. Battle ticks are delegated wholesale
//! to the resolver until it reports an outcome.

use crate::battle::{Battle, BattleCommand, BattleCtx, BattleOutcome};
use crate::dialog::{Dialog, DialogStep};
use crate::entity::{Npc, NpcId, Player};
use crate::events::{self, EventOutcome, GameEvent};
use crate::input::InputState;
use crate::movement;
use crate::present::Presenter;
use crate::scene::SceneService;
use anyhow::{Context, Result, ensure};
use data_runtime::configs::session::SessionTuning;
use data_runtime::enemy::EnemyTable;
use data_runtime::map::{EventKind, MapSpec, TriggerKind, WarpSpec};
use data_runtime::player::PlayerSpec;
use grid_core::{GridPos, MapGrid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub enum Mode {
    Explore,
    Battle(Battle),
}

/// Camera rig request; the visual smoothing itself lives outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFocus {
    Follow,
    Dialog,
    Battle,
}

/// Pure encounter comparison: a uniform draw in [0, 1) against the map rate.
#[inline]
#[must_use]
pub fn encounter_roll(rate: f32, draw: f32) -> bool {
    draw < rate
}

pub struct Session {
    grid: MapGrid,
    npcs: Vec<Npc>,
    events: Vec<GameEvent>,
    encounter_rate: f32,
    candidates: Vec<String>,
    enemies: EnemyTable,
    pub player: Player,
    mode: Mode,
    dialog: Dialog,
    /// NPC whose dialog just closed; not re-opened until we step away.
    suppressed: Option<NpcId>,
    camera: CameraFocus,
    pending_warp: Option<WarpSpec>,
    game_over: bool,
    rng: ChaCha8Rng,
    tuning: SessionTuning,
}

/// Everything rebuilt when a map document is (re)entered.
struct MapRuntime {
    grid: MapGrid,
    npcs: Vec<Npc>,
    events: Vec<GameEvent>,
    encounter_rate: f32,
    candidates: Vec<String>,
    start: GridPos,
    heading: f32,
}

fn build_map(
    map: &MapSpec,
    enemies: &EnemyTable,
    scene: &mut dyn SceneService,
) -> Result<MapRuntime> {
    let grid = MapGrid::from_rows(map.width, map.height, &map.tiles).context("build tile grid")?;
    ensure!(
        (0.0..=1.0).contains(&map.encounter_rate),
        "encounter rate {} outside [0, 1]",
        map.encounter_rate
    );
    for id in &map.enemies {
        ensure!(enemies.contains_key(id), "unknown candidate enemy id {id}");
    }
    let start = GridPos::new(map.start.x, map.start.z);
    ensure!(!grid.is_blocked(start), "start cell {start:?} is blocked");
    let mut npcs = Vec::with_capacity(map.npcs.len());
    for (i, spec) in map.npcs.iter().enumerate() {
        let mut npc = Npc::from_spec(NpcId(i as u32), spec);
        ensure!(
            grid.in_bounds(npc.pos),
            "npc {} at {:?} is out of bounds",
            npc.name,
            npc.pos
        );
        npc.visual = scene.load_visual(&spec.asset);
        if npc.visual.is_none() {
            log::warn!("npc visual unavailable, using placeholder: {}", spec.asset);
        }
        npcs.push(npc);
    }
    let mut events = Vec::with_capacity(map.events.len());
    for spec in &map.events {
        let ev = GameEvent::new(spec.clone());
        ensure!(
            grid.in_bounds(ev.pos()),
            "event at {:?} is out of bounds",
            ev.pos()
        );
        if spec.kind == EventKind::Warp {
            ensure!(
                spec.warp_to.is_some(),
                "warp event at {:?} has no destination",
                ev.pos()
            );
        }
        events.push(ev);
    }
    Ok(MapRuntime {
        grid,
        npcs,
        events,
        encounter_rate: map.encounter_rate,
        candidates: map.enemies.clone(),
        start,
        heading: map.start.heading_deg.to_radians(),
    })
}

impl Session {
    /// Build a session from the three boot documents. Any inconsistency is
    /// fatal here: no partial session is allowed to run.
    pub fn new(
        player_spec: &PlayerSpec,
        map: &MapSpec,
        enemies: EnemyTable,
        tuning: SessionTuning,
        seed: u64,
        scene: &mut dyn SceneService,
    ) -> Result<Self> {
        ensure!(player_spec.max_hp > 0, "player max_hp must be positive");
        ensure!(
            player_spec.attack >= 0 && player_spec.defense >= 0,
            "player combat stats must be non-negative"
        );
        let rt = build_map(map, &enemies, scene).context("build map runtime")?;
        let mut player = Player::from_spec(player_spec, rt.start, rt.heading, tuning.tile_m);
        player.visual = scene.load_visual(&player_spec.asset);
        if player.visual.is_none() {
            log::warn!(
                "player visual unavailable, using placeholder: {}",
                player_spec.asset
            );
        }
        Ok(Self {
            grid: rt.grid,
            npcs: rt.npcs,
            events: rt.events,
            encounter_rate: rt.encounter_rate,
            candidates: rt.candidates,
            enemies,
            player,
            mode: Mode::Explore,
            dialog: Dialog::default(),
            suppressed: None,
            camera: CameraFocus::Follow,
            pending_warp: None,
            game_over: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tuning,
        })
    }

    /// Swap in another map document (warp transition). The player lands on
    /// `at` when given, otherwise on the map's start cell.
    pub fn enter_map(
        &mut self,
        map: &MapSpec,
        at: Option<GridPos>,
        scene: &mut dyn SceneService,
    ) -> Result<()> {
        let rt = build_map(map, &self.enemies, scene).context("build map runtime")?;
        for npc in &mut self.npcs {
            if let Some(v) = npc.visual.take() {
                scene.dispose(v);
            }
        }
        let pos = at.unwrap_or(rt.start);
        ensure!(!rt.grid.is_blocked(pos), "warp target {pos:?} is blocked");
        self.grid = rt.grid;
        self.npcs = rt.npcs;
        self.events = rt.events;
        self.encounter_rate = rt.encounter_rate;
        self.candidates = rt.candidates;
        self.player.mover.teleport(pos, self.tuning.tile_m);
        if at.is_none() {
            self.player.mover.face(rt.heading);
        }
        self.suppressed = None;
        self.camera = CameraFocus::Follow;
        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub fn battle(&self) -> Option<&Battle> {
        match &self.mode {
            Mode::Battle(b) => Some(b),
            Mode::Explore => None,
        }
    }

    #[must_use]
    pub fn camera(&self) -> CameraFocus {
        self.camera
    }

    #[must_use]
    pub fn dialog_active(&self) -> bool {
        self.dialog.is_active()
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn grid(&self) -> &MapGrid {
        &self.grid
    }

    /// Warp requested by an event; the host loads the target map document
    /// and calls [`Session::enter_map`].
    pub fn take_pending_warp(&mut self) -> Option<WarpSpec> {
        self.pending_warp.take()
    }

    /// Push the current player status out through the presenter.
    pub fn publish_status(&self, hud: &mut dyn Presenter) {
        hud.player_status(
            self.player.stats.hp,
            self.player.stats.max_hp,
            self.player.progress.level,
            self.player.mover.pos,
        );
    }

    /// One cooperative tick. `dt` is the frame delta in seconds.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputState,
        scene: &mut dyn SceneService,
        hud: &mut dyn Presenter,
    ) {
        if self.game_over {
            return;
        }
        if matches!(self.mode, Mode::Explore) {
            self.explore_tick(dt, input, scene, hud);
        } else {
            self.battle_tick(dt, input, scene, hud);
        }
    }

    fn explore_tick(
        &mut self,
        dt: f32,
        input: &InputState,
        scene: &mut dyn SceneService,
        hud: &mut dyn Presenter,
    ) {
        // 1) Movement integration; arrival is the touch-event/encounter hook.
        if let Some(cell) = movement::update(&mut self.player.mover, &self.tuning, dt) {
            self.on_arrival(cell, scene, hud);
            if !matches!(self.mode, Mode::Explore) {
                return;
            }
        }
        // 2) Input.
        self.explore_input(input, hud);
        // 3) Proximity: suppression decay, then auto-dialog on a fresh NPC.
        self.proximity(hud);
        // 4) Animation.
        if let Some(v) = self.player.visual {
            scene.update(v, dt);
        }
        for npc in &self.npcs {
            if let Some(v) = npc.visual {
                scene.update(v, dt);
            }
        }
    }

    fn explore_input(&mut self, input: &InputState, hud: &mut dyn Presenter) {
        if self.dialog.is_active() {
            if input.interact_pressed {
                self.dialog_advance(hud);
            }
            return;
        }
        if input.interact_pressed {
            self.interact(hud);
        } else if input.turn_left {
            movement::turn(&mut self.player.mover, true);
        } else if input.turn_right {
            movement::turn(&mut self.player.mover, false);
        } else if input.forward {
            movement::try_step(&mut self.player.mover, &self.grid, &self.npcs);
        }
    }

    fn dialog_advance(&mut self, hud: &mut dyn Presenter) {
        let Some(id) = self.dialog.active_npc() else {
            return;
        };
        let Some(i) = self.npcs.iter().position(|n| n.id == id) else {
            return;
        };
        let step = self
            .dialog
            .advance(&mut self.npcs[i], &mut self.player, &mut self.grid, hud);
        if let Some(DialogStep::Closed { warp }) = step {
            self.camera = CameraFocus::Follow;
            if warp.is_some() {
                self.pending_warp = warp;
            }
        }
    }

    /// Explicit interaction: the facing/adjacent NPC wins over tile events.
    fn interact(&mut self, hud: &mut dyn Presenter) {
        let pos = self.player.mover.pos;
        let facing = movement::facing_cell(pos, self.player.mover.yaw);
        let npc_idx = self
            .npcs
            .iter()
            .position(|n| n.pos == facing)
            .or_else(|| self.npcs.iter().position(|n| pos.adjacent(n.pos)));
        if let Some(i) = npc_idx {
            // Talking again on purpose overrides suppression.
            self.start_dialog(i, hud);
            return;
        }
        if let Some(i) = events::event_index_at(&self.events, facing) {
            if self.events[i].spec.trigger == TriggerKind::Action {
                self.apply_event(i, hud);
            }
        }
    }

    fn start_dialog(&mut self, npc_idx: usize, hud: &mut dyn Presenter) {
        let started = self
            .dialog
            .start(&mut self.npcs[npc_idx], &mut self.player, hud);
        if started {
            self.suppressed = Some(self.npcs[npc_idx].id);
            self.camera = CameraFocus::Dialog;
        }
    }

    fn apply_event(&mut self, idx: usize, hud: &mut dyn Presenter) {
        let outcome = events::evaluate(&mut self.events[idx], &mut self.player, &mut self.grid);
        match outcome {
            EventOutcome::Applied { message, warp } => {
                if let Some(msg) = message {
                    hud.notice(&msg);
                }
                if warp.is_some() {
                    self.pending_warp = warp;
                }
            }
            EventOutcome::Failed { message } => {
                if let Some(msg) = message {
                    hud.notice(&msg);
                }
            }
            EventOutcome::Inert => {}
        }
    }

    fn proximity(&mut self, hud: &mut dyn Presenter) {
        if let Some(id) = self.suppressed {
            let pos = self.player.mover.pos;
            let still_adjacent = self
                .npcs
                .iter()
                .any(|n| n.id == id && pos.adjacent(n.pos));
            if !still_adjacent {
                self.suppressed = None;
            }
        }
        if self.dialog.is_active() || self.player.mover.in_motion() {
            return;
        }
        if let Some(i) =
            movement::adjacent_npc(self.player.mover.pos, &self.npcs, self.suppressed)
        {
            self.start_dialog(i, hud);
        }
    }

    /// Move completion: touch event first, then the encounter check. A warp
    /// suppresses the encounter; the map is about to change.
    fn on_arrival(&mut self, cell: GridPos, scene: &mut dyn SceneService, hud: &mut dyn Presenter) {
        if let Some(i) = events::event_index_at(&self.events, cell) {
            if self.events[i].spec.trigger == TriggerKind::Touch {
                self.apply_event(i, hud);
                if self.pending_warp.is_some() {
                    return;
                }
            }
        }
        self.check_encounter(scene, hud);
    }

    fn check_encounter(&mut self, scene: &mut dyn SceneService, hud: &mut dyn Presenter) {
        if self.encounter_rate <= 0.0 {
            return;
        }
        let draw: f32 = self.rng.random();
        if !encounter_roll(self.encounter_rate, draw) {
            return;
        }
        // Only enemies at or below the player's level may appear; an empty
        // pool downgrades the roll to a non-encounter.
        let eligible: Vec<&String> = self
            .candidates
            .iter()
            .filter(|id| {
                self.enemies
                    .get(id.as_str())
                    .is_some_and(|e| e.level <= self.player.progress.level)
            })
            .collect();
        if eligible.is_empty() {
            log::debug!("encounter rolled but no eligible enemies");
            return;
        }
        let pick = eligible[self.rng.random_range(0..eligible.len())].clone();
        let Some(spec) = self.enemies.get(&pick).cloned() else {
            return;
        };
        log::debug!("encounter: {pick} (draw {draw:.3} < rate {})", self.encounter_rate);
        let battle = Battle::start(
            &spec,
            &mut BattleCtx {
                player: &mut self.player,
                scene,
                hud,
                tuning: &self.tuning,
            },
        );
        self.camera = CameraFocus::Battle;
        self.mode = Mode::Battle(battle);
    }

    fn battle_tick(
        &mut self,
        dt: f32,
        input: &InputState,
        scene: &mut dyn SceneService,
        hud: &mut dyn Presenter,
    ) {
        let dt_ms = (dt * 1000.0).round() as u32;
        let mut outcome = None;
        if let Mode::Battle(battle) = &mut self.mode {
            {
                let mut ctx = BattleCtx {
                    player: &mut self.player,
                    scene,
                    hud,
                    tuning: &self.tuning,
                };
                if input.attack_pressed {
                    battle.command(BattleCommand::Attack, &mut ctx);
                } else if input.flee_pressed {
                    battle.command(BattleCommand::Flee, &mut ctx);
                } else if input.confirm_pressed {
                    battle.command(BattleCommand::Confirm, &mut ctx);
                }
                battle.tick(dt_ms, &mut ctx);
            }
            if let Some(v) = self.player.visual {
                scene.update(v, dt);
            }
            if let Some(v) = battle.enemy.visual {
                scene.update(v, dt);
            }
            outcome = battle.outcome();
            if outcome.is_some() {
                if let Some(v) = battle.enemy.visual.take() {
                    scene.dispose(v);
                }
            }
        }
        if let Some(out) = outcome {
            hud.battle_end();
            self.camera = CameraFocus::Follow;
            self.mode = Mode::Explore;
            if out == BattleOutcome::Loss && !self.player.stats.alive() {
                self.game_over = true;
                hud.notice("You have fallen. The session is over.");
            }
        }
    }
}
