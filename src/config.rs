//! Game tuning knobs
//!
//! Every constant the simulation consumes lives here so hosts can override
//! the balance at construction time. Unknown or missing fields in supplied
//! JSON fall back to the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation tuning, fixed for the lifetime of a [`GameState`].
///
/// Speeds are in field pixels per tick; the field origin is top-left with y
/// increasing downward. Field dimensions and entity extents must be strictly
/// positive; [`Config::from_json`] enforces this for host-supplied values.
///
/// [`GameState`]: crate::sim::GameState
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Play field width in pixels
    pub field_width: f32,
    /// Play field height in pixels
    pub field_height: f32,

    /// Player ship extents
    pub player_size: Vec2,
    /// Horizontal player speed
    pub player_speed: f32,
    /// Lives at the start of a session
    pub starting_lives: u32,

    /// Bullet extents
    pub bullet_size: Vec2,
    /// Upward bullet speed
    pub bullet_speed: f32,

    /// Enemy extents
    pub enemy_size: Vec2,
    /// Downward enemy speed at level 1
    pub enemy_base_speed: f32,
    /// Extra enemy speed per level above 1
    pub enemy_speed_per_level: f32,
    /// Per-tick probability of an enemy spawn attempt succeeding
    pub enemy_spawn_rate: f32,
    /// Cap on concurrently live enemies
    pub max_enemies: usize,

    /// Particles per explosion burst
    pub burst_size: usize,
    /// Outward particle speed in a burst
    pub particle_speed: f32,
    /// Life drained from each particle per tick (life starts at 1)
    pub particle_decay: f32,
    /// Particle render radius (the sim never reads this, hosts do)
    pub particle_size: f32,

    /// Points per destroyed enemy, multiplied by the current level
    pub score_per_kill: u32,
    /// Score required per level step
    pub level_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_size: Vec2::new(30.0, 40.0),
            player_speed: 5.0,
            starting_lives: 3,

            bullet_size: Vec2::new(5.0, 15.0),
            bullet_speed: 7.0,

            enemy_size: Vec2::new(25.0, 25.0),
            enemy_base_speed: 2.0,
            enemy_speed_per_level: 0.5,
            enemy_spawn_rate: 0.02,
            max_enemies: 10,

            burst_size: 8,
            particle_speed: 3.0,
            particle_decay: 0.02,
            particle_size: 3.0,

            score_per_kill: 10,
            level_threshold: 500,
        }
    }
}

impl Config {
    /// Parse a config from host-supplied JSON, defaulting absent fields.
    ///
    /// Rejects geometry the simulation cannot run on, so a parsed config
    /// never makes `tick` fail later.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), serde_json::Error> {
        use serde::de::Error;

        // `!(v > 0)` rather than `v <= 0` so NaN is rejected too
        let positive = |extent: Vec2| extent.x > 0.0 && extent.y > 0.0;
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(serde_json::Error::custom(
                "field_width and field_height must be positive",
            ));
        }
        if !(positive(self.player_size) && positive(self.bullet_size) && positive(self.enemy_size))
        {
            return Err(serde_json::Error::custom("entity sizes must be positive"));
        }
        Ok(())
    }

    /// Downward speed for an enemy spawned at `level`.
    pub fn enemy_speed_for_level(&self, level: u32) -> f32 {
        self.enemy_base_speed + level.saturating_sub(1) as f32 * self.enemy_speed_per_level
    }

    /// Level implied by an accumulated score. Monotone in `score`, so the
    /// level can never decrease over a session.
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.level_threshold + 1
    }
}
