//! Fleeing always succeeds and ends the battle without a victory.

use data_runtime::configs::session::SessionTuning;
use data_runtime::enemy::EnemySpec;
use data_runtime::player::PlayerSpec;
use grid_core::GridPos;
use session_core::battle::{Battle, BattleCommand, BattleCtx, BattleOutcome, BattlePhase};
use session_core::entity::Player;
use session_core::present::RecordingPresenter;
use session_core::scene::RecordingScene;

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
fn flee_ends_after_the_delay_with_no_state_change() {
    let tuning = SessionTuning::default();
    let mut scene = RecordingScene::default();
    let mut hud = RecordingPresenter::default();
    let spec = PlayerSpec {
        name: "Wren".into(),
        asset: String::new(),
        hp: 100,
        max_hp: 100,
        attack: 15,
        defense: 3,
        level: 1,
        xp: 0,
        next_xp: 100,
    };
    let mut player = Player::from_spec(&spec, GridPos::new(1, 1), 0.0, 2.0);
    let enemy = EnemySpec {
        name: "Marsh Wraith".into(),
        level: 1,
        hp: 90,
        attack: 18,
        defense: 4,
        exp: 60,
        asset: String::new(),
    };

    let mut battle = Battle::start(&enemy, &mut ctx(&mut player, &mut scene, &mut hud, &tuning));
    battle.tick(600, &mut ctx(&mut player, &mut scene, &mut hud, &tuning));
    assert_eq!(battle.phase(), BattlePhase::PlayerTurn);

    battle.command(
        BattleCommand::Flee,
        &mut ctx(&mut player, &mut scene, &mut hud, &tuning),
    );
    assert_eq!(battle.phase(), BattlePhase::Fled);
    assert!(battle.outcome().is_none());

    // Attacks during the escape window are ignored.
    battle.command(
        BattleCommand::Attack,
        &mut ctx(&mut player, &mut scene, &mut hud, &tuning),
    );
    assert_eq!(battle.enemy.stats.hp, 90);

    battle.tick(
        tuning.flee_delay_ms,
        &mut ctx(&mut player, &mut scene, &mut hud, &tuning),
    );
    assert_eq!(battle.outcome(), Some(BattleOutcome::Loss));
    assert_eq!(player.stats.hp, 100);
    assert_eq!(player.progress.xp, 0);
}
