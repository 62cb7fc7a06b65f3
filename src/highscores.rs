//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::platform::storage;

/// Name recorded when the player leaves the field blank
pub const DEFAULT_NAME: &str = "Anonymous";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player's display name
    pub name: String,
    /// Final score
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "blockblast_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the top 10
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return score > 0;
        }
        // Must beat the lowest entry outright
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

    /// Record a finished game.
    ///
    /// The name is trimmed, falling back to "Anonymous". Equal scores keep
    /// their existing order, so the newcomer goes after them. Returns the rank
    /// achieved (1-indexed), or None if the entry fell off the bottom.
    pub fn add_score(&mut self, name: &str, score: u64, timestamp: f64) -> Option<usize> {
        let name = match name.trim() {
            "" => DEFAULT_NAME,
            trimmed => trimmed,
        };
        let entry = LeaderboardEntry {
            name: name.to_string(),
            score,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far, 0 when nobody has played
    pub fn top_score(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Parse a stored leaderboard, starting fresh if the data is unusable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Leaderboard>(json) {
            Ok(mut scores) => {
                scores.entries.truncate(MAX_HIGH_SCORES);
                scores
            }
            Err(e) => {
                log::warn!("Discarding corrupt leaderboard: {}", e);
                Self::new()
            }
        }
    }

    /// Load high scores from storage
    pub fn load() -> Self {
        match storage::read(Self::STORAGE_KEY) {
            Some(json) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to storage
    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("High scores saved ({} entries)", self.entries.len());
        }
    }
}

/// Describe how long ago `timestamp` was, for timestamps under a week old
pub fn format_age(now: f64, timestamp: f64) -> Option<String> {
    let diff_mins = (now - timestamp) / 1000.0 / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;
    if diff_days >= 7.0 {
        return None;
    }

    let text = if diff_days >= 1.0 {
        match diff_days.floor() as i32 {
            1 => "Yesterday".to_string(),
            days => format!("{} days ago", days),
        }
    } else if diff_hours >= 1.0 {
        match diff_hours.floor() as i32 {
            1 => "1 hour ago".to_string(),
            hours => format!("{} hours ago", hours),
        }
    } else if diff_mins >= 1.0 {
        match diff_mins.floor() as i32 {
            1 => "1 min ago".to_string(),
            mins => format!("{} mins ago", mins),
        }
    } else {
        "Just now".to_string()
    };
    Some(text)
}

/// Format a timestamp as a relative date string
#[cfg(target_arch = "wasm32")]
pub fn format_date(timestamp: f64) -> String {
    format_age(js_sys::Date::now(), timestamp).unwrap_or_else(|| {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp));
        format!(
            "{}/{}/{}",
            date.get_month() + 1,
            date.get_date(),
            date.get_full_year() % 100
        )
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_date(_timestamp: f64) -> String {
    "N/A".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(scores: &[u64]) -> Leaderboard {
        let mut board = Leaderboard::new();
        for (i, &score) in scores.iter().enumerate() {
            board.add_score(&format!("p{}", i), score, i as f64);
        }
        board
    }

    #[test]
    fn test_add_keeps_descending_order() {
        let board = board_with(&[50, 200, 120]);
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![200, 120, 50]);
        assert_eq!(board.top_score(), 200);
    }

    #[test]
    fn test_name_trimmed_and_defaulted() {
        let mut board = Leaderboard::new();
        board.add_score("  Ada  ", 10, 0.0);
        board.add_score("   ", 5, 0.0);
        assert_eq!(board.entries[0].name, "Ada");
        assert_eq!(board.entries[1].name, DEFAULT_NAME);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        board.add_score("first", 100, 1.0);
        assert_eq!(board.add_score("second", 100, 2.0), Some(2));
        assert_eq!(board.entries[0].name, "first");
        assert_eq!(board.entries[1].name, "second");
    }

    #[test]
    fn test_truncates_to_ten() {
        let mut board = board_with(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert_eq!(board.add_score("late", 5, 0.0), None);
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);

        assert_eq!(board.add_score("champ", 1000, 0.0), Some(1));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_qualifies() {
        let board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));

        let full = board_with(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert!(!full.qualifies(10));
        assert!(full.qualifies(11));
        assert_eq!(full.potential_rank(11), Some(10));
        assert_eq!(full.potential_rank(95), Some(2));
        assert_eq!(full.potential_rank(3), None);
    }

    #[test]
    fn test_top_score_empty() {
        assert_eq!(Leaderboard::new().top_score(), 0);
        assert!(Leaderboard::new().is_empty());
    }

    #[test]
    fn test_from_json() {
        let board = board_with(&[30, 10]);
        let json = serde_json::to_string(&board).unwrap();
        let restored = Leaderboard::from_json(&json);
        assert_eq!(restored.entries, board.entries);

        assert!(Leaderboard::from_json("not json").is_empty());
    }

    #[test]
    fn test_format_age() {
        let min = 60_000.0;
        let now = 1_000_000_000.0;
        assert_eq!(format_age(now, now - 10_000.0).as_deref(), Some("Just now"));
        assert_eq!(format_age(now, now - min).as_deref(), Some("1 min ago"));
        assert_eq!(format_age(now, now - 5.0 * min).as_deref(), Some("5 mins ago"));
        assert_eq!(format_age(now, now - 60.0 * min).as_deref(), Some("1 hour ago"));
        assert_eq!(format_age(now, now - 180.0 * min).as_deref(), Some("3 hours ago"));
        assert_eq!(format_age(now, now - 1440.0 * min).as_deref(), Some("Yesterday"));
        assert_eq!(format_age(now, now - 3.0 * 1440.0 * min).as_deref(), Some("3 days ago"));
        assert_eq!(format_age(now, now - 8.0 * 1440.0 * min), None);
    }
}
