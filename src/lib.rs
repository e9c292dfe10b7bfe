//! Flap Gates - a single-screen gravity arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, game state)
//! - `scheduler`: Frame and spawn clock driving the simulation
//! - `game`: Session controller tying the simulation to the outside world
//! - `highscores`: Top-5 leaderboard
//! - `persistence`: Durable key-value slots (memory, file, LocalStorage)
//! - `render`: Per-frame draw list for an external surface
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod frontend;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use frontend::{Frontend, NullFrontend};
pub use game::Game;
pub use highscores::Leaderboard;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one animation frame at 60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum frames simulated per scheduler advance
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta accepted in one advance (seconds)
    pub const MAX_FRAME_DELTA: f64 = 0.25;

    /// Playfield dimensions (logical units)
    pub const PLAYFIELD_WIDTH: f64 = 400.0;
    pub const PLAYFIELD_HEIGHT: f64 = 500.0;

    /// Avatar defaults
    pub const AVATAR_X: f64 = 50.0;
    pub const AVATAR_START_Y: f64 = 250.0;
    pub const AVATAR_RADIUS: f64 = 15.0;

    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f64 = 0.6;
    /// Velocity applied by a flap (negative = up)
    pub const LIFT: f64 = -10.0;

    /// Obstacle geometry
    pub const GAP_SIZE: f64 = 150.0;
    pub const OBSTACLE_WIDTH: f64 = 50.0;

    /// Obstacle speed (units/frame)
    pub const OBSTACLE_SPEED: f64 = 2.0;
    pub const SLOW_OBSTACLE_SPEED: f64 = 1.0;

    /// Power-up lifetime (seconds)
    pub const POWER_UP_DURATION: f64 = 5.0;
    /// Time between obstacle spawns (seconds)
    pub const SPAWN_INTERVAL: f64 = 2.0;

    /// Leaderboard length
    pub const MAX_HIGH_SCORES: usize = 5;
}
