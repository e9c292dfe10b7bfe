//! Session controller
//!
//! `Game` owns the simulation state, the scheduler, the leaderboard and the
//! two external seams (frontend + storage). Every command goes through it,
//! and after each one it drains the simulation's events and turns them into
//! sounds, overlays and leaderboard writes.

use crate::audio::SoundEffect;
use crate::frontend::Frontend;
use crate::highscores::Leaderboard;
use crate::input::{Command, InputEvent, InputMapper};
use crate::persistence::Storage;
use crate::render::Frame;
use crate::scheduler::{Scheduled, Scheduler};
use crate::settings::Settings;
use crate::sim::{self, CollisionKind, GameEvent, GameState};
use crate::tuning::Tuning;

pub struct Game<F: Frontend, S: Storage> {
    state: GameState,
    scheduler: Scheduler,
    leaderboard: Leaderboard,
    input: InputMapper,
    frontend: F,
    storage: S,
}

impl<F: Frontend, S: Storage> Game<F, S> {
    /// Create a game with default tuning and settings read from `storage`
    pub fn new(frontend: F, storage: S, seed: u64) -> Self {
        let settings = Settings::load(&storage);
        Self::with_options(frontend, storage, seed, Tuning::default(), &settings)
    }

    pub fn with_options(
        mut frontend: F,
        storage: S,
        seed: u64,
        tuning: Tuning,
        settings: &Settings,
    ) -> Self {
        let leaderboard = Leaderboard::load(&storage);
        let scheduler = Scheduler::new(tuning.spawn_interval);
        frontend.show_start_screen();
        log::info!("Game initialized with seed: {}", seed);

        Self {
            state: GameState::with_tuning(seed, tuning),
            scheduler,
            leaderboard,
            input: InputMapper::new(settings.key_bindings.clone()),
            frontend,
            storage,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Begin a new session. Ignored while one is running.
    pub fn start_game(&mut self) {
        if !self.state.start_session() {
            return;
        }
        self.frontend.hide_overlays();
        self.scheduler.start();
        log::info!("Session started");
        self.dispatch_events();
    }

    /// End the running session (normally reached through a collision)
    pub fn end_game(&mut self) {
        self.state.end_session(None);
        self.dispatch_events();
    }

    pub fn flap(&mut self) {
        self.state.flap();
        self.dispatch_events();
    }

    pub fn activate_slow_motion(&mut self) {
        self.state.activate_slow_motion();
        self.dispatch_events();
    }

    pub fn activate_invisibility(&mut self) {
        self.state.activate_invisibility();
        self.dispatch_events();
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Flap => self.flap(),
            Command::ActivateSlowMotion => self.activate_slow_motion(),
            Command::ActivateInvisibility => self.activate_invisibility(),
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        let command = self.input.map(event);
        self.execute(command);
    }

    /// Feed wall-clock time to the scheduler and run whatever falls due
    pub fn advance(&mut self, elapsed: f64) {
        for call in self.scheduler.advance(elapsed) {
            if !self.state.is_running() {
                break;
            }
            match call {
                Scheduled::Spawn => self.spawn_obstacle(),
                Scheduled::Frame => self.frame(),
            }
        }
    }

    /// Run one physics frame and present it
    pub fn frame(&mut self) {
        if !self.state.is_running() {
            return;
        }
        sim::tick(&mut self.state, self.scheduler.frame_interval());
        self.frontend.draw(&Frame::build(&self.state));
        self.dispatch_events();
    }

    pub fn spawn_obstacle(&mut self) {
        sim::spawn_obstacle(&mut self.state);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::SessionStarted => {}
                GameEvent::Flapped => self.frontend.play(SoundEffect::Jump),
                GameEvent::ObstacleSpawned { .. } => {}
                GameEvent::Scored { .. } => self.frontend.play(SoundEffect::Score),
                GameEvent::PowerUpActivated(kind) => {
                    log::info!("{} activated", kind.as_str());
                    self.frontend.play(SoundEffect::PowerUp);
                }
                GameEvent::PowerUpExpired(kind) => {
                    log::info!("{} expired", kind.as_str());
                }
                GameEvent::Collision(kind) => {
                    match kind {
                        CollisionKind::Ground => log::info!("Hit the ground"),
                        CollisionKind::Obstacle { id } => log::info!("Hit obstacle {}", id),
                    }
                    self.frontend.play(SoundEffect::Hit);
                }
                GameEvent::GameOver { score } => self.finish_session(score),
            }
        }
    }

    fn finish_session(&mut self, score: u64) {
        self.scheduler.stop();

        match self.leaderboard.submit(score) {
            Some(rank) => log::info!("Game over with score {} (rank #{})", score, rank),
            None => log::info!("Game over with score {}", score),
        }
        self.leaderboard.save(&mut self.storage);

        self.frontend.show_leaderboard(&self.leaderboard);
        self.frontend.notify_game_over(score);
        self.frontend.show_start_screen();
    }
}
