//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]: the avatar, the
//! obstacle sequence, power-up flags, score and lifecycle phase. Components
//! receive it by reference; there is no process-wide state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::powerup::{PowerUpKind, PowerUps};
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Terminal collision happened; waiting for a new start
    Ended,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Ground,
    Obstacle { id: u32 },
}

/// Things that happened inside the simulation, drained by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    Flapped,
    ObstacleSpawned { id: u32 },
    Scored { score: u64 },
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    Collision(CollisionKind),
    /// Sole terminal transition; emitted exactly once per session
    GameOver { score: u64 },
}

/// The player-controlled falling entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Horizontal position (constant)
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    /// Collision radius (constant)
    pub radius: f64,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.avatar_x,
            y: tuning.avatar_start_y,
            velocity: 0.0,
            radius: tuning.avatar_radius,
        }
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}

/// A barrier pair with a passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge; decreases every tick
    pub x: f64,
    /// Height of the top segment
    pub gap_top: f64,
    /// Height of the bottom segment
    pub gap_bottom: f64,
}

impl Obstacle {
    pub fn trailing_edge(&self, width: f64) -> f64 {
        self.x + width
    }

    /// Y coordinate where the bottom segment begins
    pub fn bottom_segment_y(&self, playfield_height: f64) -> f64 {
        playfield_height - self.gap_bottom
    }

    /// Vertical centre of the gap
    pub fn gap_center(&self, playfield_height: f64) -> f64 {
        (self.gap_top + self.bottom_segment_y(playfield_height)) / 2.0
    }
}

/// Complete game state for one controller
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Gap-height RNG (continues across sessions)
    pub rng: Pcg32,
    pub avatar: Avatar,
    /// Obstacles in creation order
    pub obstacles: Vec<Obstacle>,
    pub power_ups: PowerUps,
    pub score: u64,
    pub phase: GamePhase,
    /// True once any session has been started
    pub started: bool,
    /// Session clock in seconds
    pub clock: f64,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Pending events for the controller
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            avatar: Avatar::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            obstacles: Vec::new(),
            power_ups: PowerUps::default(),
            score: 0,
            phase: GamePhase::NotStarted,
            started: false,
            clock: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything session-scoped and enter `Running`.
    /// Ignored while a session is already running.
    pub fn start_session(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.clear();
        self.power_ups.reset();
        self.score = 0;
        self.clock = 0.0;
        self.time_ticks = 0;
        self.started = true;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::SessionStarted);
        true
    }

    /// Terminal transition. Ignored unless running.
    pub fn end_session(&mut self, cause: Option<CollisionKind>) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = GamePhase::Ended;
        if let Some(kind) = cause {
            self.events.push(GameEvent::Collision(kind));
        }
        self.events.push(GameEvent::GameOver { score: self.score });
        true
    }

    /// Set the avatar velocity to the lift constant
    pub fn flap(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.avatar.velocity = self.tuning.lift;
        self.events.push(GameEvent::Flapped);
        true
    }

    /// Start a power-up. No-op when not running or already active.
    pub fn activate_power_up(&mut self, kind: PowerUpKind) -> bool {
        if !self.is_running() {
            return false;
        }
        if !self
            .power_ups
            .activate(kind, self.clock, self.tuning.power_up_duration)
        {
            return false;
        }
        self.events.push(GameEvent::PowerUpActivated(kind));
        true
    }

    pub fn activate_slow_motion(&mut self) -> bool {
        self.activate_power_up(PowerUpKind::SlowMotion)
    }

    pub fn activate_invisibility(&mut self) -> bool {
        self.activate_power_up(PowerUpKind::Invisibility)
    }

    /// Current obstacle speed (slow while slow motion is active)
    pub fn obstacle_speed(&self) -> f64 {
        self.power_ups.obstacle_speed(&self.tuning)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
