//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per host frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod state;
pub mod tick;

pub use collision::{hits_ceiling, hits_side_wall, reaches_floor_band};
pub use field::{Brick, BrickField};
pub use state::{Ball, CueKind, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
