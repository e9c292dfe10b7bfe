//! Timed power-up effects
//!
//! Each effect is a flag plus an expiry timestamp on the session clock.
//! Activation is ignored while the effect is already running, so the timer
//! can never be extended. Expiry is polled at the top of every tick instead of
//! being scheduled as a callback, which means nothing outlives a session reset.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Obstacles move at the slow speed
    SlowMotion,
    /// Obstacle collisions are skipped
    Invisibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::SlowMotion, PowerUpKind::Invisibility];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::SlowMotion => "Slow motion",
            PowerUpKind::Invisibility => "Invisibility",
        }
    }
}

/// One timed boolean effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub active: bool,
    /// Session-clock time at which the effect ends
    pub expires_at: Option<f64>,
}

impl TimedEffect {
    /// Seconds left before expiry (0 when inactive)
    pub fn remaining(&self, now: f64) -> f64 {
        match (self.active, self.expires_at) {
            (true, Some(at)) => (at - now).max(0.0),
            _ => 0.0,
        }
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUps {
    pub slow_motion: TimedEffect,
    pub invisibility: TimedEffect,
}

impl PowerUps {
    pub fn effect(&self, kind: PowerUpKind) -> &TimedEffect {
        match kind {
            PowerUpKind::SlowMotion => &self.slow_motion,
            PowerUpKind::Invisibility => &self.invisibility,
        }
    }

    fn effect_mut(&mut self, kind: PowerUpKind) -> &mut TimedEffect {
        match kind {
            PowerUpKind::SlowMotion => &mut self.slow_motion,
            PowerUpKind::Invisibility => &mut self.invisibility,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.effect(kind).active
    }

    pub fn any_active(&self) -> bool {
        self.slow_motion.active || self.invisibility.active
    }

    /// Turn an effect on until `now + duration`.
    /// Returns false (and changes nothing) if it is already active.
    pub fn activate(&mut self, kind: PowerUpKind, now: f64, duration: f64) -> bool {
        let effect = self.effect_mut(kind);
        if effect.active {
            return false;
        }
        effect.active = true;
        effect.expires_at = Some(now + duration);
        true
    }

    /// Clear every effect whose expiry has been reached; returns the kinds cleared
    pub fn expire(&mut self, now: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let effect = self.effect_mut(kind);
            if effect.active && effect.expires_at.is_some_and(|at| now >= at) {
                *effect = TimedEffect::default();
                expired.push(kind);
            }
        }
        expired
    }

    /// Current obstacle speed given slow motion
    pub fn obstacle_speed(&self, tuning: &Tuning) -> f64 {
        if self.slow_motion.active {
            tuning.slow_obstacle_speed
        } else {
            tuning.obstacle_speed
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_sets_expiry() {
        let mut power_ups = PowerUps::default();
        assert!(power_ups.activate(PowerUpKind::SlowMotion, 1.0, 5.0));
        assert!(power_ups.is_active(PowerUpKind::SlowMotion));
        assert_eq!(power_ups.slow_motion.expires_at, Some(6.0));
        assert!(!power_ups.is_active(PowerUpKind::Invisibility));
    }

    #[test]
    fn test_reactivation_does_not_extend() {
        let mut power_ups = PowerUps::default();
        assert!(power_ups.activate(PowerUpKind::Invisibility, 0.0, 5.0));
        assert!(!power_ups.activate(PowerUpKind::Invisibility, 3.0, 5.0));
        assert_eq!(power_ups.invisibility.expires_at, Some(5.0));
    }

    #[test]
    fn test_expire_only_due_effects() {
        let mut power_ups = PowerUps::default();
        power_ups.activate(PowerUpKind::SlowMotion, 0.0, 5.0);
        power_ups.activate(PowerUpKind::Invisibility, 2.0, 5.0);

        assert!(power_ups.expire(4.9).is_empty());
        assert_eq!(power_ups.expire(5.0), vec![PowerUpKind::SlowMotion]);
        assert!(!power_ups.is_active(PowerUpKind::SlowMotion));
        assert!(power_ups.is_active(PowerUpKind::Invisibility));
        assert_eq!(power_ups.expire(7.5), vec![PowerUpKind::Invisibility]);
        assert!(!power_ups.any_active());
    }

    #[test]
    fn test_obstacle_speed_follows_slow_motion() {
        let tuning = Tuning::default();
        let mut power_ups = PowerUps::default();
        assert_eq!(power_ups.obstacle_speed(&tuning), 2.0);
        power_ups.activate(PowerUpKind::SlowMotion, 0.0, 5.0);
        assert_eq!(power_ups.obstacle_speed(&tuning), 1.0);
        power_ups.expire(5.0);
        assert_eq!(power_ups.obstacle_speed(&tuning), 2.0);
    }

    #[test]
    fn test_remaining() {
        let mut power_ups = PowerUps::default();
        assert_eq!(power_ups.slow_motion.remaining(0.0), 0.0);
        power_ups.activate(PowerUpKind::SlowMotion, 0.0, 5.0);
        assert_eq!(power_ups.slow_motion.remaining(2.0), 3.0);
        assert_eq!(power_ups.slow_motion.remaining(9.0), 0.0);
    }
}
