//! High score leaderboard system
//!
//! Tracks the top 10 scores through any [`Storage`] backend.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, HIGHSCORES_KEY, Storage};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify.
    /// Ties rank below the entries already on the board.
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;

        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores, starting fresh when there are none or they can't be read
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load::<HighScores>(storage, HIGHSCORES_KEY) {
            Ok(Some(scores)) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not read high scores ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> persistence::Result<()> {
        persistence::save(storage, HIGHSCORES_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    #[test]
    fn test_zero_never_qualifies() {
        assert!(!HighScores::new().qualifies(0));
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(100, 1, 0.0), Some(1));
        assert_eq!(scores.add_score(300, 2, 0.0), Some(1));
        assert_eq!(scores.add_score(200, 1, 0.0), Some(2));
        let values: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut scores = HighScores::new();
        scores.add_score(100, 1, 1.0);
        assert_eq!(scores.add_score(100, 2, 2.0), Some(2));
        assert_eq!(scores.entries[0].timestamp, 1.0);
    }

    #[test]
    fn test_full_board_keeps_top_ten() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, 1, 0.0);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add_score(1000, 4, 0.0), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::default();
        let mut scores = HighScores::new();
        scores.add_score(1234, 3, 0.0);
        scores.save(&mut storage).unwrap();

        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.top_score(), Some(1234));
        assert_eq!(loaded.entries[0].level, 3);
    }
}
