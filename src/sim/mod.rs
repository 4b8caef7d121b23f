//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick motion only (speeds are pixels per tick)
//! - Seeded RNG only, consumed at one well-defined point per tick
//! - Stable iteration order (push order, ids only ever grow)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use state::{Bullet, Button, Buttons, Enemy, GamePhase, GameState, Particle, Player};
pub use tick::tick;
