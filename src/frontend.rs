//! Side-effect seam between the game controller and its host
//!
//! Drawing, sound, overlays and the end-of-game notification all belong to
//! the host (browser page, terminal, test harness). The controller calls
//! these hooks on state transitions and never reads anything back.

use crate::audio::SoundEffect;
use crate::highscores::Leaderboard;
use crate::render::Frame;

pub trait Frontend {
    /// Present one simulated frame
    fn draw(&mut self, frame: &Frame);

    /// Fire-and-forget audio cue
    fn play(&mut self, effect: SoundEffect);

    /// Hide the start screen and leaderboard overlays
    fn hide_overlays(&mut self);

    /// Show the start screen overlay
    fn show_start_screen(&mut self);

    /// Refresh and show the leaderboard overlay
    fn show_leaderboard(&mut self, leaderboard: &Leaderboard);

    /// Blocking "game over" notification
    fn notify_game_over(&mut self, score: u64);
}

/// Frontend that ignores everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFrontend;

impl Frontend for NullFrontend {
    fn draw(&mut self, _frame: &Frame) {}
    fn play(&mut self, _effect: SoundEffect) {}
    fn hide_overlays(&mut self) {}
    fn show_start_screen(&mut self) {}
    fn show_leaderboard(&mut self, _leaderboard: &Leaderboard) {}
    fn notify_game_over(&mut self, _score: u64) {}
}
