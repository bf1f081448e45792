//! High score leaderboard system
//!
//! Tracks the top 10 scores. Serialization is JSON; where the entries
//! actually live (browser storage, a file, a server) is the host's
//! business.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level reached (1-indexed for display)
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
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
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

    /// Serialize for the host's storage backend
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore from the host's storage backend. A corrupt blob yields a
    /// fresh board rather than an error.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(_) => {
                log::info!("No usable high scores found, starting fresh");
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_never_qualifies() {
        let board = HighScores::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
    }

    #[test]
    fn keeps_descending_order_and_trims() {
        let mut board = HighScores::new();
        for s in [30u64, 10, 50, 20, 40, 60, 70, 80, 90, 100, 110, 120] {
            board.add_score(s, 1, 0.0);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        for pair in board.entries.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(board.top_score(), Some(120));
        // 10 and 20 fell off the bottom
        assert!(board.entries.iter().all(|e| e.score >= 30));
    }

    #[test]
    fn rank_matches_insertion() {
        let mut board = HighScores::new();
        board.add_score(100, 3, 0.0);
        board.add_score(50, 2, 0.0);
        assert_eq!(board.potential_rank(75), Some(2));
        assert_eq!(board.add_score(75, 2, 0.0), Some(2));
        assert_eq!(board.entries[1].score, 75);
    }

    #[test]
    fn corrupt_json_starts_fresh() {
        let board = HighScores::from_json("{definitely broken");
        assert!(board.is_empty());

        let mut original = HighScores::new();
        original.add_score(42, 2, 1000.0);
        let round = HighScores::from_json(&original.to_json().unwrap());
        assert_eq!(round.top_score(), Some(42));
    }
}
