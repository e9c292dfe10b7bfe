//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame integration only
//! - Seeded RNG only
//! - Obstacles iterated in creation order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{crossed_trailing_edge, hits_ground, hits_obstacle};
pub use powerup::{PowerUpKind, PowerUps, TimedEffect};
pub use state::{Avatar, CollisionKind, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{spawn_obstacle, tick};
