//! Sky Raid entry point
//!
//! Headless demo driver: seeds a session, lets a small autopilot play it, and
//! logs the result. Real hosts embed the library instead, calling
//! `apply_input` from their event handlers and `tick` once per frame before
//! rendering.

use sky_raid::config::Config;
use sky_raid::sim::{Button, GamePhase, GameState, tick};

/// Safety cap so a lucky autopilot run still terminates.
const MAX_TICKS: u64 = 120 * 60 * 5; // five minutes at 120 Hz

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("starting demo run with seed {seed}");

    let mut state = GameState::new(Config::default(), seed);
    while state.phase != GamePhase::GameOver && state.tick_count < MAX_TICKS {
        autopilot(&mut state);
        tick(&mut state);
    }

    println!(
        "seed {seed}: score {} at level {} with {} lives after {} ticks",
        state.score, state.level, state.lives, state.tick_count
    );
}

/// Steer under the lowest enemy and keep the trigger warm.
///
/// Deliberately simple: it chases whichever enemy is closest to the bottom,
/// which also parks the ship in its path, so runs end on ram collisions as
/// often as on escapes.
fn autopilot(state: &mut GameState) {
    let target = state
        .enemies
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|enemy| enemy.pos.x + enemy.size.x / 2.0);

    let ship_center = state.player.pos.x + state.player.size.x / 2.0;
    let (left, right) = match target {
        Some(x) if x < ship_center - 2.0 => (true, false),
        Some(x) if x > ship_center + 2.0 => (false, true),
        _ => (false, false),
    };
    state.apply_input(Button::Left, left);
    state.apply_input(Button::Right, right);

    // Release every other tick so each press is a fresh edge
    let fire = state.tick_count % 2 == 0;
    state.apply_input(Button::Fire, fire);
}
