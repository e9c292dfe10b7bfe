//! Frame and spawn clock
//!
//! Converts wall-clock deltas into an ordered list of simulation calls: a
//! fixed-step frame tick and a periodic obstacle spawn. The controller owns
//! one and starts/stops it with the session, so nothing here depends on a
//! render surface or a browser timer.

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};

/// A call the controller should make, in time order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// Spawn one obstacle
    Spawn,
    /// Run one physics frame
    Frame,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    frame_interval: f64,
    spawn_interval: f64,
    /// Scheduler time since `start`
    now: f64,
    next_frame: f64,
    next_spawn: f64,
    running: bool,
}

impl Scheduler {
    pub fn new(spawn_interval: f64) -> Self {
        Self::with_frame_interval(SIM_DT, spawn_interval)
    }

    pub fn with_frame_interval(frame_interval: f64, spawn_interval: f64) -> Self {
        Self {
            frame_interval,
            spawn_interval,
            now: 0.0,
            next_frame: frame_interval,
            next_spawn: spawn_interval,
            running: false,
        }
    }

    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reset both timers and begin emitting calls
    pub fn start(&mut self) {
        self.now = 0.0;
        self.next_frame = self.frame_interval;
        self.next_spawn = self.spawn_interval;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `elapsed` wall-clock seconds.
    ///
    /// Large deltas (tab in background) are clamped, and at most
    /// `MAX_SUBSTEPS` frames are emitted; any frame backlog beyond that is
    /// dropped. On a tie the spawn comes first so the new obstacle moves on
    /// the same frame.
    pub fn advance(&mut self, elapsed: f64) -> Vec<Scheduled> {
        let mut calls = Vec::new();
        if !self.running || elapsed <= 0.0 {
            return calls;
        }

        let target = self.now + elapsed.min(MAX_FRAME_DELTA);
        let mut frames = 0;

        loop {
            let spawn_due = self.spawn_interval > 0.0 && self.next_spawn <= target;
            let frame_due = frames < MAX_SUBSTEPS && self.next_frame <= target;

            if spawn_due && (!frame_due || self.next_spawn <= self.next_frame) {
                calls.push(Scheduled::Spawn);
                self.next_spawn += self.spawn_interval;
            } else if frame_due {
                calls.push(Scheduled::Frame);
                self.next_frame += self.frame_interval;
                frames += 1;
            } else {
                break;
            }
        }

        if self.next_frame <= target {
            log::debug!("Dropping frame backlog at {:.3}s", target);
            while self.next_frame <= target {
                self.next_frame += self.frame_interval;
            }
        }

        self.now = target;
        calls
    }
}
