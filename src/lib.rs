//! Sky Raid - deterministic core for a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, tick loop)
//! - `config`: Data-driven game tuning
//!
//! Rendering, window/input plumbing, and HUD updates are host concerns. The
//! host forwards decoded input through [`sim::GameState::apply_input`], calls
//! [`sim::tick()`] once per displayed frame, and draws whatever the state holds
//! afterwards. Nothing in this crate blocks, draws, or touches a platform API.

pub mod config;
pub mod sim;

pub use config::Config;
pub use sim::{Button, GamePhase, GameState};
