//! Victory resolution: xp award, the level-up cutscene gate, and the
//! plain-victory path that skips it.

use data_runtime::configs::session::SessionTuning;
use data_runtime::enemy::EnemySpec;
use data_runtime::player::PlayerSpec;
use grid_core::GridPos;
use session_core::battle::{Battle, BattleCommand, BattleCtx, BattleOutcome, BattlePhase};
use session_core::entity::Player;
use session_core::present::RecordingPresenter;
use session_core::scene::{RecordingScene, SceneService};

fn player() -> Player {
    let spec = PlayerSpec {
        name: "Wren".into(),
        asset: "assets/models/wren.glb".into(),
        hp: 100,
        max_hp: 100,
        attack: 15,
        defense: 3,
        level: 1,
        xp: 0,
        next_xp: 100,
    };
    Player::from_spec(&spec, GridPos::new(1, 1), 0.0, 2.0)
}

fn weak_enemy(exp: u32) -> EnemySpec {
    EnemySpec {
        name: "Slime".into(),
        level: 1,
        hp: 5,
        attack: 6,
        defense: 1,
        exp,
        asset: "assets/models/slime.glb".into(),
    }
}

fn ctx<'a>(
    player: &'a mut Player,
    scene: &'a mut RecordingScene,
    hud: &'a mut RecordingPresenter,
    tuning: &'a SessionTuning,
) -> BattleCtx<'a> {
    BattleCtx {
        player,
        scene,
        hud,
        tuning,
    }
}

#[test]
fn small_reward_ends_the_battle_without_a_cutscene() {
    let tuning = SessionTuning::default();
    let mut scene = RecordingScene::default();
    scene.durations_ms.insert("death".into(), 700);
    let mut hud = RecordingPresenter::default();
    let mut p = player();

    let mut battle = Battle::start(
        &weak_enemy(8),
        &mut ctx(&mut p, &mut scene, &mut hud, &tuning),
    );
    battle.tick(600, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    battle.command(
        BattleCommand::Attack,
        &mut ctx(&mut p, &mut scene, &mut hud, &tuning),
    );
    assert_eq!(battle.phase(), BattlePhase::Victory);
    assert!(hud.log.iter().any(|l| l.contains("You gain 8 exp")));

    // Still waiting out the death animation.
    battle.tick(300, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    assert!(battle.outcome().is_none());
    assert_eq!(p.progress.xp, 0);

    battle.tick(400, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    assert_eq!(battle.outcome(), Some(BattleOutcome::Victory));
    assert_eq!(p.progress.xp, 8);
    assert_eq!(p.progress.level, 1);
    // The enemy visual was disposed during resolution.
    assert_eq!(scene.disposed.len(), 1);
}

#[test]
fn levelup_waits_for_confirmation() {
    let tuning = SessionTuning::default();
    let mut scene = RecordingScene::default();
    let mut hud = RecordingPresenter::default();
    let mut p = player();
    p.visual = scene.load_visual("assets/models/wren.glb");

    let mut battle = Battle::start(
        &weak_enemy(150),
        &mut ctx(&mut p, &mut scene, &mut hud, &tuning),
    );
    battle.tick(600, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    battle.command(
        BattleCommand::Attack,
        &mut ctx(&mut p, &mut scene, &mut hud, &tuning),
    );
    // Unknown death clip duration resolves on the next tick.
    battle.tick(16, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    assert_eq!(battle.phase(), BattlePhase::LevelUp);
    assert_eq!(p.progress.level, 2);
    assert_eq!(p.progress.next_xp, 150);
    assert_eq!(p.progress.xp, 150);
    assert_eq!(p.stats.max_hp, 120);
    assert_eq!(p.stats.hp, 120);
    assert!(hud.log.iter().any(|l| l.contains("level 2")));

    // The player's visual is staged for the cutscene and the battle holds
    // open until the explicit confirmation.
    assert_eq!(scene.staged.len(), 1);
    battle.tick(60_000, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    assert!(battle.outcome().is_none());

    battle.command(
        BattleCommand::Confirm,
        &mut ctx(&mut p, &mut scene, &mut hud, &tuning),
    );
    assert_eq!(scene.restored.len(), 1);
    assert_eq!(battle.outcome(), Some(BattleOutcome::Victory));
}

#[test]
fn defeat_is_terminal() {
    let tuning = SessionTuning::default();
    let mut scene = RecordingScene::default();
    let mut hud = RecordingPresenter::default();
    let spec = PlayerSpec {
        name: "Wren".into(),
        asset: String::new(),
        hp: 3,
        max_hp: 100,
        attack: 1,
        defense: 0,
        level: 1,
        xp: 0,
        next_xp: 100,
    };
    let mut p = Player::from_spec(&spec, GridPos::new(1, 1), 0.0, 2.0);
    let brute = EnemySpec {
        name: "Marsh Wraith".into(),
        level: 1,
        hp: 90,
        attack: 18,
        defense: 4,
        exp: 60,
        asset: String::new(),
    };
    let mut battle = Battle::start(&brute, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    battle.tick(600, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    battle.command(
        BattleCommand::Attack,
        &mut ctx(&mut p, &mut scene, &mut hud, &tuning),
    );
    battle.tick(2_000, &mut ctx(&mut p, &mut scene, &mut hud, &tuning));
    assert_eq!(battle.phase(), BattlePhase::Defeat);
    assert_eq!(p.stats.hp, 0);
    assert!(battle.outcome().is_none());
    battle.tick(
        tuning.defeat_delay_ms,
        &mut ctx(&mut p, &mut scene, &mut hud, &tuning),
    );
    assert_eq!(battle.outcome(), Some(BattleOutcome::Loss));
}
