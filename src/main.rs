use anyhow::Result;
use hollowdeep::boot;
use hollowdeep::hud::HudModel;
use hollowdeep::session::battle::BattlePhase;
use hollowdeep::session::input::InputState;
use hollowdeep::session::scene::NullScene;
use hollowdeep::session::session::Mode;

/// Headless demo: boot the session from the bundled data and walk the map
/// for a while, resolving whatever dialogs and battles come up.
fn main() -> Result<()> {
    // Developer-friendly default logging (info+) unless RUST_LOG overrides.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let seed = std::env::var("HOLLOWDEEP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut scene = NullScene;
    let mut hud = HudModel::default();
    let mut session = boot::load_session("hollow_gate", seed, &mut scene)?;
    session.publish_status(&mut hud);
    log::info!("session up (seed {seed}): {}", hud.status_line());

    let dt = 0.016f32;
    let mut printed = 0;
    for step in 0..2400u32 {
        if session.game_over() {
            log::info!("game over after {step} ticks");
            break;
        }
        let mut input = InputState::default();
        match session.mode() {
            Mode::Battle(battle) => match battle.phase() {
                BattlePhase::PlayerTurn => input.attack_pressed = true,
                BattlePhase::LevelUp => input.confirm_pressed = true,
                _ => {}
            },
            Mode::Explore => {
                if session.dialog_active() {
                    // Advance one line every third of a second.
                    input.interact_pressed = step % 20 == 0;
                } else if step % 160 == 0 {
                    input.turn_left = true;
                } else {
                    input.forward = true;
                }
            }
        }
        session.tick(dt, &input, &mut scene, &mut hud);
        if let Some(warp) = session.take_pending_warp() {
            log::info!("warp to {} ({}, {})", warp.map, warp.x, warp.z);
            let map = hollowdeep::data::loader::load_map_spec(format!("maps/{}.json", warp.map))?;
            session.enter_map(
                &map,
                Some(hollowdeep::grid::GridPos::new(warp.x, warp.z)),
                &mut scene,
            )?;
        }
        let start = printed.min(hud.log().len());
        for line in &hud.log()[start..] {
            log::info!("{line}");
        }
        printed = hud.log().len();
    }
    session.publish_status(&mut hud);
    log::info!("done: {}", hud.status_line());
    Ok(())
}
