//! Turn-based battle resolver.
//!
//! A small phase machine whose delayed beats (arrival announcement, enemy
//! strike, victory resolution, battle end) run through [`PhaseTimers`], so a
//! beat scheduled under an abandoned phase can never mutate state.

use crate::entity::{Enemy, Player};
use crate::present::Presenter;
use crate::scene::SceneService;
use crate::schedule::PhaseTimers;
use data_runtime::configs::session::SessionTuning;
use data_runtime::enemy::EnemySpec;
use grid_core::{Progress, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Arrival announcement pending.
    Intro,
    PlayerTurn,
    EnemyTurn,
    Victory,
    LevelUp,
    Defeat,
    /// Escape accepted, battle end pending.
    Fled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleCommand {
    Attack,
    Flee,
    /// Dismisses the level-up cutscene.
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Loss,
}

/// Delayed beats; only ever applied under the epoch they were scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Beat {
    Announce,
    EnemyStrike,
    ResolveVictory,
    Finish(bool),
}

/// Mutable collaborators a battle needs each call.
pub struct BattleCtx<'a> {
    pub player: &'a mut Player,
    pub scene: &'a mut dyn SceneService,
    pub hud: &'a mut dyn Presenter,
    pub tuning: &'a SessionTuning,
}

pub struct Battle {
    phase: BattlePhase,
    timers: PhaseTimers<Beat>,
    pub enemy: Enemy,
    outcome: Option<BattleOutcome>,
}

/// Damage floor of 1 guarantees forward progress; no stalemates.
#[inline]
#[must_use]
pub fn strike_damage(attack: i32, defense: i32) -> i32 {
    (attack - defense).max(1)
}

/// Award experience and loop level gains, re-checking the threshold against
/// each new `next_xp`. Excess experience rolls over, never resets.
pub fn award_xp(stats: &mut Stats, progress: &mut Progress, reward: u32, growth: f32) -> u32 {
    progress.xp += reward;
    let mut gained = 0;
    while progress.xp > progress.next_xp {
        progress.level += 1;
        stats.max_hp += 20;
        stats.hp = stats.max_hp;
        stats.attack += 5;
        stats.defense += 2;
        progress.next_xp = (progress.next_xp as f32 * growth).floor() as u32;
        gained += 1;
    }
    gained
}

impl Battle {
    /// Instantiate the enemy and open with the arrival beat.
    pub fn start(spec: &EnemySpec, ctx: &mut BattleCtx) -> Self {
        let mut enemy = Enemy::from_spec(spec);
        enemy.visual = ctx.scene.load_visual(&spec.asset);
        if enemy.visual.is_none() {
            log::warn!("enemy visual unavailable, using placeholder: {}", spec.asset);
        }
        ctx.hud.battle_begin(&enemy.name);
        ctx.hud
            .enemy_status(&enemy.name, enemy.stats.hp, enemy.stats.max_hp);
        let mut battle = Self {
            phase: BattlePhase::Intro,
            timers: PhaseTimers::new(),
            enemy,
            outcome: None,
        };
        battle
            .timers
            .schedule(ctx.tuning.intro_delay_ms, Beat::Announce);
        battle
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Set once the battle has fully ended; the orchestrator polls this.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Player input. Commands outside their phase are ignored.
    pub fn command(&mut self, cmd: BattleCommand, ctx: &mut BattleCtx) {
        match (self.phase, cmd) {
            (BattlePhase::PlayerTurn, BattleCommand::Attack) => self.player_attack(ctx),
            (BattlePhase::PlayerTurn, BattleCommand::Flee) => self.flee(ctx),
            (BattlePhase::LevelUp, BattleCommand::Confirm) => self.confirm_level(ctx),
            _ => {}
        }
    }

    /// Advance pending beats. Each application re-checks the epoch, so a
    /// beat that changes phase silences the rest of the due set.
    pub fn tick(&mut self, dt_ms: u32, ctx: &mut BattleCtx) {
        if self.outcome.is_some() {
            return;
        }
        self.timers.advance(dt_ms);
        while let Some(beat) = self.timers.pop_due() {
            self.apply(beat, ctx);
            if self.outcome.is_some() {
                break;
            }
        }
    }

    fn enter(&mut self, phase: BattlePhase) {
        log::debug!("battle phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.timers.bump();
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        log::debug!("battle finished: {outcome:?}");
        self.outcome = Some(outcome);
        self.timers.bump();
    }

    fn apply(&mut self, beat: Beat, ctx: &mut BattleCtx) {
        match beat {
            Beat::Announce => {
                ctx.hud
                    .battle_log(format!("A {} draws near!", self.enemy.name));
                self.enter(BattlePhase::PlayerTurn);
            }
            Beat::EnemyStrike => self.enemy_strike(ctx),
            Beat::ResolveVictory => self.resolve_victory(ctx),
            Beat::Finish(victory) => self.finish(if victory {
                BattleOutcome::Victory
            } else {
                BattleOutcome::Loss
            }),
        }
    }

    fn player_attack(&mut self, ctx: &mut BattleCtx) {
        let dmg = strike_damage(ctx.player.stats.attack, self.enemy.stats.defense);
        self.enemy.stats.hp = (self.enemy.stats.hp - dmg).max(0);
        ctx.hud
            .battle_log(format!("You strike the {} for {}.", self.enemy.name, dmg));
        ctx.hud
            .enemy_status(&self.enemy.name, self.enemy.stats.hp, self.enemy.stats.max_hp);
        if let Some(v) = ctx.player.visual {
            ctx.scene.play(v, "attack");
        }
        if self.enemy.stats.alive() {
            self.enter(BattlePhase::EnemyTurn);
            // The hit lands partway through the enemy's swing animation.
            let anim = match self.enemy.visual {
                Some(v) => ctx.scene.play(v, "attack"),
                None => 0,
            };
            let anim = if anim == 0 {
                ctx.tuning.default_attack_ms
            } else {
                anim
            };
            let delay =
                ctx.tuning.turn_delay_ms + (anim as f32 * ctx.tuning.hit_fraction) as u32;
            self.timers.schedule(delay, Beat::EnemyStrike);
        } else {
            self.enter(BattlePhase::Victory);
            ctx.hud.battle_log(format!(
                "The {} falls! You gain {} exp.",
                self.enemy.name, self.enemy.exp
            ));
            let death = match self.enemy.visual {
                Some(v) => ctx.scene.play(v, "death"),
                None => 0,
            };
            let wait = death.min(ctx.tuning.max_death_wait_ms);
            self.timers.schedule(wait, Beat::ResolveVictory);
        }
    }

    fn enemy_strike(&mut self, ctx: &mut BattleCtx) {
        let dmg = strike_damage(self.enemy.stats.attack, ctx.player.stats.defense);
        ctx.player.stats.hp = (ctx.player.stats.hp - dmg).max(0);
        ctx.hud
            .battle_log(format!("The {} hits you for {}.", self.enemy.name, dmg));
        ctx.hud.player_status(
            ctx.player.stats.hp,
            ctx.player.stats.max_hp,
            ctx.player.progress.level,
            ctx.player.mover.pos,
        );
        if ctx.player.stats.alive() {
            self.enter(BattlePhase::PlayerTurn);
        } else {
            self.enter(BattlePhase::Defeat);
            ctx.hud.battle_log("You fall...".to_string());
            self.timers
                .schedule(ctx.tuning.defeat_delay_ms, Beat::Finish(false));
        }
    }

    fn resolve_victory(&mut self, ctx: &mut BattleCtx) {
        if let Some(v) = self.enemy.visual.take() {
            ctx.scene.dispose(v);
        }
        let gained = award_xp(
            &mut ctx.player.stats,
            &mut ctx.player.progress,
            self.enemy.exp,
            ctx.tuning.xp_growth,
        );
        ctx.hud.player_status(
            ctx.player.stats.hp,
            ctx.player.stats.max_hp,
            ctx.player.progress.level,
            ctx.player.mover.pos,
        );
        if gained > 0 {
            self.enter(BattlePhase::LevelUp);
            ctx.hud.battle_log(format!(
                "Level up! You reach level {}.",
                ctx.player.progress.level
            ));
            if let Some(v) = ctx.player.visual {
                ctx.scene.stage_center(v);
            }
        } else {
            self.finish(BattleOutcome::Victory);
        }
    }

    fn confirm_level(&mut self, ctx: &mut BattleCtx) {
        if let Some(v) = ctx.player.visual {
            ctx.scene.restore(v);
        }
        self.finish(BattleOutcome::Victory);
    }

    fn flee(&mut self, ctx: &mut BattleCtx) {
        // Fleeing is never blocked.
        ctx.hud
            .battle_log("You slip away from the fight.".to_string());
        self.enter(BattlePhase::Fled);
        self.timers
            .schedule(ctx.tuning.flee_delay_ms, Beat::Finish(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_never_drops_below_one() {
        assert_eq!(strike_damage(15, 3), 12);
        assert_eq!(strike_damage(5, 5), 1);
        assert_eq!(strike_damage(2, 40), 1);
    }

    fn base() -> (Stats, Progress) {
        (
            Stats {
                hp: 100,
                max_hp: 100,
                attack: 15,
                defense: 3,
            },
            Progress {
                level: 1,
                xp: 0,
                next_xp: 100,
            },
        )
    }

    #[test]
    fn xp_rollover_is_preserved() {
        let (mut stats, mut progress) = base();
        let gained = award_xp(&mut stats, &mut progress, 150, 1.5);
        assert_eq!(gained, 1);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.next_xp, 150);
        assert_eq!(progress.xp, 150);
        assert_eq!(stats.max_hp, 120);
        assert_eq!(stats.hp, 120);
        assert_eq!(stats.attack, 20);
        assert_eq!(stats.defense, 5);
    }

    #[test]
    fn one_reward_can_cross_several_thresholds() {
        let (mut stats, mut progress) = base();
        let gained = award_xp(&mut stats, &mut progress, 400, 1.5);
        assert_eq!(gained, 4);
        assert_eq!(progress.level, 5);
        // 100 -> 150 -> 225 -> 337 -> 505
        assert_eq!(progress.next_xp, 505);
        assert_eq!(progress.xp, 400);
    }

    #[test]
    fn reward_below_threshold_changes_nothing_but_xp() {
        let (mut stats, mut progress) = base();
        let gained = award_xp(&mut stats, &mut progress, 40, 1.5);
        assert_eq!(gained, 0);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.xp, 40);
        assert_eq!(stats.attack, 15);
    }
}
