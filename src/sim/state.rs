//! Game state and core simulation types
//!
//! [`GameState`] exclusively owns every live entity plus the score, level,
//! lives, and phase scalars. Entities are plain data with a `bounds()` box
//! and an `advance()` step; all orchestration (spawning, collisions,
//! removal) happens in [`tick`](super::tick::tick).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::config::Config;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen; toggling pause again resumes
    Paused,
    /// Run ended. Terminal: only constructing a fresh state leaves it.
    GameOver,
}

/// Host-facing input buttons.
///
/// Hosts map whatever raw key events they receive onto these; anything they
/// can't map is simply never forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Fire,
}

/// Held-button state, written by input handlers and read by `tick`.
///
/// Input handlers only flip these flags (plus the one-shot fire edge in
/// [`GameState::apply_input`]), so they are safe to call at any point
/// between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// The player ship, bound to the bottom of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed, pixels per tick
    pub speed: f32,
    pub buttons: Buttons,
}

impl Player {
    fn new(config: &Config) -> Self {
        // Centered horizontally, hovering just above the bottom edge
        let pos = Vec2::new(
            (config.field_width - config.player_size.x) / 2.0,
            config.field_height - config.player_size.y - 10.0,
        );
        Self {
            pos,
            size: config.player_size,
            speed: config.player_speed,
            buttons: Buttons::default(),
        }
    }

    /// Apply held input, then clamp back into `[0, field_width - width]`.
    /// The player is the only entity constrained to the field; everything
    /// else despawns by leaving it.
    pub fn advance(&mut self, field_width: f32) {
        if self.buttons.left {
            self.pos.x -= self.speed;
        }
        if self.buttons.right {
            self.pos.x += self.speed;
        }
        self.pos.x = self.pos.x.min(field_width - self.size.x).max(0.0);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Muzzle position: middle of the top edge.
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

/// A descending enemy. Speed is fixed at spawn from the level then.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed, pixels per tick
    pub speed: f32,
}

impl Enemy {
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A player bullet, travelling straight up.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed, pixels per tick
    pub speed: f32,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// An explosion particle. Purely visual: never collides with anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life, 1 at spawn, dead at <= 0
    pub life: f32,
    /// Life drained per tick
    pub decay: f32,
    /// Render radius (hosts read this, the sim does not)
    pub size: f32,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Complete simulation state for one session.
///
/// Deterministic for a given `(Config, seed)` and input sequence. Hosts read
/// the public fields to render; all mutation goes through [`apply_input`],
/// [`toggle_pause`], and [`tick`](super::tick::tick).
///
/// [`apply_input`]: GameState::apply_input
/// [`toggle_pause`]: GameState::toggle_pause
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Tuning, fixed for the session
    pub config: Config,
    /// Session seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub tick_count: u64,
    pub score: u32,
    /// Difficulty tier, derived from score, starts at 1 and never decreases
    pub level: u32,
    pub lives: u32,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    /// Spawn-roll RNG; one roll per running tick keeps the stream aligned
    pub(crate) rng: Pcg32,
    /// Next entity id
    next_id: u32,
}

impl GameState {
    /// Construct the initial state: centered player, empty collections,
    /// score 0, level 1, lives from config.
    pub fn new(config: Config, seed: u64) -> Self {
        let player = Player::new(&config);
        let lives = config.starting_lives;
        Self {
            config,
            seed,
            tick_count: 0,
            score: 0,
            level: 1,
            lives,
            phase: GamePhase::Running,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Record a button transition from the host.
    ///
    /// Held state is always recorded so a key released during pause is not
    /// stuck down on resume. The one-shot fire action triggers on the
    /// false-to-true edge only. It is append-only and therefore safe to call
    /// at any point between ticks, including while paused: the bullet just
    /// sits in the collection until the next running tick moves it. Only the
    /// terminal state swallows the shot.
    pub fn apply_input(&mut self, button: Button, pressed: bool) {
        let fire_edge = !self.player.buttons.fire && pressed;
        match button {
            Button::Left => self.player.buttons.left = pressed,
            Button::Right => self.player.buttons.right = pressed,
            Button::Fire => self.player.buttons.fire = pressed,
        }
        if button == Button::Fire && fire_edge && self.phase != GamePhase::GameOver {
            self.spawn_bullet();
        }
    }

    /// Flip Running/Paused; ignored once the run has ended.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Running,
            GamePhase::GameOver => {}
        }
    }

    /// Append a bullet at the player's muzzle.
    fn spawn_bullet(&mut self) {
        let id = self.next_entity_id();
        let size = self.config.bullet_size;
        let muzzle = self.player.top_center();
        self.bullets.push(Bullet {
            id,
            pos: Vec2::new(muzzle.x - size.x / 2.0, muzzle.y - size.y),
            size,
            speed: self.config.bullet_speed,
        });
    }

    /// Spawn one enemy just above the visible top at the given x, with speed
    /// scaled by the current level.
    pub fn spawn_enemy(&mut self, x: f32) {
        let id = self.next_entity_id();
        let size = self.config.enemy_size;
        let speed = self.config.enemy_speed_for_level(self.level);
        log::debug!("enemy {id} spawned at x={x:.1} speed={speed:.1}");
        self.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, -size.y),
            size,
            speed,
        });
    }

    /// Spawn an explosion burst: `count` particles at equal angular spacing
    /// around a full circle, each with life 1. Purely additive.
    pub fn spawn_explosion(&mut self, at: Vec2, count: usize) {
        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * self.config.particle_speed,
                life: 1.0,
                decay: self.config.particle_decay,
                size: self.config.particle_size,
            });
        }
    }

    /// Decrement lives and enter GameOver the moment they hit zero.
    pub(crate) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("life lost, {} remaining", self.lives);
        if self.lives == 0 {
            log::info!(
                "game over: score {} at level {} after {} ticks",
                self.score,
                self.level,
                self.tick_count
            );
            self.phase = GamePhase::GameOver;
        }
    }
}
