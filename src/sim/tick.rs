//! Per-tick simulation update
//!
//! One call advances the whole world by a single fixed step. The host invokes
//! [`tick`] once per rendered frame; the step order below is load-bearing for
//! determinism and matches the documented update contract:
//!
//! 1. player movement (clamped to the field)
//! 2. enemy spawn roll
//! 3. enemy advance + fate resolution (escape / ram, lives, game over)
//! 4. bullet advance + first-hit enemy destruction (score, level)
//! 5. particle advance + expiry
//!
//! Removals are mark-and-compact: fates are decided against a stable snapshot
//! of each collection, then applied in one `retain` pass. Each enemy resolves
//! to exactly one fate per tick, so a single enemy can never cost two lives.

use rand::Rng;

use super::collision::overlaps;
use super::state::{GamePhase, GameState};

/// Advance the game by one fixed step.
///
/// A no-op while paused or after game over. Mutates nothing but `state`.
pub fn tick(state: &mut GameState) {
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Running => {}
    }

    state.tick_count += 1;

    // 1. Player moves under held input, clamped to the field.
    let field_width = state.config.field_width;
    state.player.advance(field_width);

    // 2. Spawn roll. The roll is consumed every tick, hit or miss, so the
    // RNG stream never depends on the live-enemy count.
    let roll: f32 = state.rng.random();
    if roll < state.config.enemy_spawn_rate && state.enemies.len() < state.config.max_enemies {
        let x = state.rng.random_range(0.0..state.config.field_width);
        state.spawn_enemy(x);
    }

    // 3. Enemies advance, then each resolves at most one fate: escaping past
    // the bottom or ramming the player. Both cost a life; only a ram bursts.
    let player_bounds = state.player.bounds();
    let mut slain: Vec<u32> = Vec::new();
    for idx in 0..state.enemies.len() {
        state.enemies[idx].advance();

        let escaped = state.enemies[idx].pos.y > state.config.field_height;
        let rammed = !escaped && overlaps(&state.enemies[idx].bounds(), &player_bounds);
        if !escaped && !rammed {
            continue;
        }

        let id = state.enemies[idx].id;
        slain.push(id);
        if rammed {
            log::debug!("enemy {id} rammed the player");
            let burst = state.config.burst_size;
            state.spawn_explosion(player_bounds.center(), burst);
        } else {
            log::debug!("enemy {id} escaped past the bottom");
        }

        state.lose_life();
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    state.enemies.retain(|e| !slain.contains(&e.id));
    if state.phase == GamePhase::GameOver {
        return;
    }

    // 4. Bullets advance; one leaving the top is spent with no further
    // checks. Otherwise the first overlapping enemy consumes it: both are
    // removed, the kill scores at the level it happened on, and the level is
    // re-derived from the new score.
    let mut spent: Vec<u32> = Vec::new();
    let mut destroyed: Vec<u32> = Vec::new();
    for idx in 0..state.bullets.len() {
        state.bullets[idx].advance();
        if state.bullets[idx].pos.y < 0.0 {
            spent.push(state.bullets[idx].id);
            continue;
        }

        let bullet_bounds = state.bullets[idx].bounds();
        let hit = state
            .enemies
            .iter()
            .filter(|e| !destroyed.contains(&e.id))
            .find(|e| overlaps(&bullet_bounds, &e.bounds()))
            .map(|e| (e.id, e.bounds().center()));
        let Some((enemy_id, impact)) = hit else {
            continue;
        };

        spent.push(state.bullets[idx].id);
        destroyed.push(enemy_id);

        state.score += state.config.score_per_kill * state.level;
        let burst = state.config.burst_size;
        state.spawn_explosion(impact, burst);

        let new_level = state.config.level_for_score(state.score);
        if new_level > state.level {
            log::info!(
                "level up: {} -> {} at score {}",
                state.level,
                new_level,
                state.score
            );
            state.level = new_level;
        }
    }
    state.bullets.retain(|b| !spent.contains(&b.id));
    state.enemies.retain(|e| !destroyed.contains(&e.id));

    // 5. Particles drift and fade.
    for particle in &mut state.particles {
        particle.advance();
    }
    state.particles.retain(|p| p.alive());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::Button;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Default tuning with random spawning disabled, so tests control
    /// exactly which enemies exist.
    fn quiet_config() -> Config {
        Config {
            enemy_spawn_rate: 0.0,
            ..Config::default()
        }
    }

    #[test]
    fn test_tick_noop_while_paused() {
        let mut state = GameState::new(quiet_config(), 1);
        state.spawn_enemy(100.0);
        state.apply_input(Button::Fire, true);
        state.toggle_pause();

        let before = state.clone();
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_tick_noop_after_game_over() {
        let mut state = GameState::new(quiet_config(), 1);
        state.spawn_enemy(100.0);
        state.phase = GamePhase::GameOver;

        let before = state.clone();
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_enemy_escape_costs_a_life() {
        let mut state = GameState::new(quiet_config(), 1);
        state.spawn_enemy(100.0);
        assert_eq!(state.enemies[0].speed, 2.0);

        // Fall from y = -25 to past y = 600 at 2 px/tick
        for _ in 0..400 {
            tick(&mut state);
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Running);
        // Escapes do not burst
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_enemy_ram_costs_life_and_bursts() {
        let mut state = GameState::new(quiet_config(), 1);
        state.spawn_enemy(0.0);
        // Park the enemy right on top of the player
        state.enemies[0].pos = state.player.pos - Vec2::new(0.0, 10.0);

        tick(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(state.particles.len(), 8);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_bullet_kill_scores_and_levels_up() {
        let mut state = GameState::new(quiet_config(), 1);
        state.score = 490;
        state.apply_input(Button::Fire, true);
        state.spawn_enemy(0.0);

        // Place the enemy just above the bullet so the next step overlaps
        let bullet_pos = state.bullets[0].pos;
        state.enemies[0].pos = bullet_pos - Vec2::new(10.0, 20.0);

        tick(&mut state);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 500); // 490 + 10 * level 1
        assert_eq!(state.level, 2); // 500 / 500 + 1
        assert_eq!(state.particles.len(), 8);
    }

    #[test]
    fn test_kill_scores_at_level_before_recompute() {
        let mut state = GameState::new(quiet_config(), 1);
        state.score = 600;
        state.level = 2;
        state.apply_input(Button::Fire, true);
        state.spawn_enemy(0.0);
        let bullet_pos = state.bullets[0].pos;
        state.enemies[0].pos = bullet_pos - Vec2::new(10.0, 20.0);

        tick(&mut state);
        assert_eq!(state.score, 620); // 10 * level 2
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_one_bullet_consumes_one_enemy() {
        let mut state = GameState::new(quiet_config(), 1);
        state.apply_input(Button::Fire, true);
        let bullet_pos = state.bullets[0].pos;

        // Two enemies stacked over the same spot
        state.spawn_enemy(0.0);
        state.spawn_enemy(0.0);
        state.enemies[0].pos = bullet_pos - Vec2::new(10.0, 20.0);
        state.enemies[1].pos = bullet_pos - Vec2::new(10.0, 20.0);

        tick(&mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_bullet_leaving_top_is_spent_without_checks() {
        let mut state = GameState::new(quiet_config(), 1);
        state.apply_input(Button::Fire, true);
        state.bullets[0].pos.y = 3.0; // next advance puts it above 0

        // An enemy sits where the bullet would have been
        state.spawn_enemy(0.0);
        state.enemies[0].pos = Vec2::new(state.bullets[0].pos.x, -4.0);

        tick(&mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_last_life_ends_the_game_for_good() {
        let mut state = GameState::new(quiet_config(), 1);
        state.lives = 1;
        state.spawn_enemy(0.0);
        state.enemies[0].pos = state.player.pos - Vec2::new(0.0, 10.0);

        tick(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal state swallows fire and freezes the world
        state.apply_input(Button::Fire, true);
        assert!(state.bullets.is_empty());
        let before = state.clone();
        for _ in 0..20 {
            tick(&mut state);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_spawning_respects_max_enemies() {
        let config = Config {
            enemy_spawn_rate: 1.0,
            max_enemies: 3,
            ..Config::default()
        };
        let mut state = GameState::new(config, 42);
        for _ in 0..50 {
            tick(&mut state);
            assert!(state.enemies.len() <= 3);
        }
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = GameState::new(quiet_config(), 1);
        state.spawn_explosion(Vec2::new(100.0, 100.0), 8);

        // decay 0.02 drains a full life in 50 ticks; allow float slack
        for _ in 0..55 {
            tick(&mut state);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical, with
        // random spawning active.
        let mut state1 = GameState::new(Config::default(), 99999);
        let mut state2 = GameState::new(Config::default(), 99999);

        for step in 0u32..600 {
            let (button, pressed) = match step % 7 {
                0 => (Button::Left, true),
                1 => (Button::Fire, true),
                2 => (Button::Left, false),
                3 => (Button::Right, true),
                4 => (Button::Fire, false),
                5 => (Button::Right, false),
                _ => (Button::Fire, true),
            };
            state1.apply_input(button, pressed);
            state2.apply_input(button, pressed);
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1, state2);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            steps in proptest::collection::vec((0u8..3, any::<bool>()), 1..200)
        ) {
            let mut state = GameState::new(quiet_config(), 7);
            for (code, pressed) in steps {
                let button = match code {
                    0 => Button::Left,
                    1 => Button::Right,
                    _ => Button::Fire,
                };
                state.apply_input(button, pressed);
                tick(&mut state);

                let max_x = state.config.field_width - state.player.size.x;
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= max_x);
            }
        }
    }
}
