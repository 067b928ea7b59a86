//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from tick timestamps
//! - Randomness comes only from an injected source
//! - Obstacles are kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod field;
pub mod player;
pub mod run;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, collides};
pub use difficulty::{DifficultyParams, clamp_stage, compute_difficulty};
pub use field::{Obstacle, RandomSource, SeededRandom, advance, maybe_spawn, prune};
pub use player::{Direction, InvalidDirection, Player, move_lane};
pub use run::RunStateMachine;
pub use state::{Arena, GameEvent, RunPhase, RunState, Snapshot};
pub use tick::{TickInput, start, tick};
