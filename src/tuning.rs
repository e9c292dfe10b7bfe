//! Data-driven game balance
//!
//! Every physics constant the simulation reads goes through [`Tuning`], so a
//! JSON file can override the defaults without a rebuild. Missing fields fall
//! back to the values in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and pacing constants for one game instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f64,
    pub playfield_height: f64,

    pub avatar_x: f64,
    pub avatar_start_y: f64,
    pub avatar_radius: f64,

    /// Added to the avatar velocity every frame
    pub gravity: f64,
    /// Velocity a flap sets (overrides, never accumulates)
    pub lift: f64,

    pub gap_size: f64,
    pub obstacle_width: f64,
    pub obstacle_speed: f64,
    /// Obstacle speed while slow motion is active
    pub slow_obstacle_speed: f64,

    /// Seconds a power-up stays active
    pub power_up_duration: f64,
    /// Seconds between obstacle spawns
    pub spawn_interval: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            avatar_x: AVATAR_X,
            avatar_start_y: AVATAR_START_Y,
            avatar_radius: AVATAR_RADIUS,
            gravity: GRAVITY,
            lift: LIFT,
            gap_size: GAP_SIZE,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            slow_obstacle_speed: SLOW_OBSTACLE_SPEED,
            power_up_duration: POWER_UP_DURATION,
            spawn_interval: SPAWN_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Largest gap-top height a spawned obstacle may get (exclusive)
    pub fn max_gap_top(&self) -> f64 {
        (self.playfield_height / 2.0).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.lift, LIFT);
        assert_eq!(tuning.gap_size, GAP_SIZE);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("not json").is_err());
    }

    #[test]
    fn test_max_gap_top_is_half_height() {
        assert_eq!(Tuning::default().max_gap_top(), 250.0);
    }
}
