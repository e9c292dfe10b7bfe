//! High score leaderboard system
//!
//! Persisted as a flat JSON array of scores, descending, top 5 only.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::persistence::{self, Storage};

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    scores: Vec<u64>,
}

impl Leaderboard {
    /// Storage slot key
    pub const STORAGE_KEY: &'static str = "flap_gates_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Build from an arbitrary list, keeping the top entries in order
    pub fn from_scores(mut scores: Vec<u64>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    /// Scores, highest first
    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.scores.first().copied()
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.scores.last().is_none_or(|&lowest| score > lowest)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.scores.iter().position(|&s| score > s);
        Some(rank.unwrap_or(self.scores.len()) + 1)
    }

    /// Record a finished session.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn submit(&mut self, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score);

        // Ties go after existing equal scores
        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        self.scores.insert(pos, score);
        self.scores.truncate(MAX_HIGH_SCORES);

        rank
    }

    /// Load the leaderboard from storage.
    /// Missing or unreadable data yields an empty board.
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Vec<u64>>(storage, Self::STORAGE_KEY) {
            Ok(Some(scores)) => {
                let board = Self::from_scores(scores);
                log::info!("Loaded {} high scores", board.len());
                board
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {e}");
                Self::new()
            }
        }
    }

    /// Write the whole board back to storage; failures are logged
    pub fn save(&self, storage: &mut dyn Storage) {
        match persistence::save_json(storage, Self::STORAGE_KEY, &self.scores) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.scores.len()),
            Err(e) => log::warn!("Failed to save high scores: {e}"),
        }
    }

    /// Display lines ("#1: 10")
    pub fn lines(&self) -> Vec<String> {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, score)| format!("#{}: {}", i + 1, score))
            .collect()
    }
}
