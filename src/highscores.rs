//! High score leaderboard
//!
//! Keeps the top 10 (name, score) entries and writes them through a
//! [`ScoreStore`] after every insertion.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name typed on the name entry screen
    pub name: String,
    /// Platforms passed
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Ranked entries, highest score first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<HighScoreEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary saved entries, restoring order and size bounds
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Check if a score would make it onto the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Append an entry, re-rank and trim
    ///
    /// Returns the 1-indexed rank achieved, or None if the entry fell off the
    /// bottom of a full board.
    pub fn insert(&mut self, name: impl Into<String>, score: u64) -> Option<usize> {
        self.entries.push(HighScoreEntry::new(name, score));
        let inserted = self.entries.len() - 1;

        // Stable sort: equal scores keep insertion order, so the new entry
        // lands after any existing entry with the same score.
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].score.cmp(&self.entries[a].score));
        let rank = order.iter().position(|&i| i == inserted);

        self.normalize();
        rank.filter(|&r| r < MAX_HIGH_SCORES).map(|r| r + 1)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Leaderboard bound to its persistence backend
pub struct LeaderboardStore {
    board: Leaderboard,
    store: Box<dyn ScoreStore>,
}

impl LeaderboardStore {
    /// Load saved scores. Missing or unreadable data yields an empty board.
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let board = match store.load() {
            Ok(entries) => {
                log::info!("Loaded {} high scores", entries.len());
                Leaderboard::from_entries(entries)
            }
            Err(e) => {
                log::warn!("Could not load high scores, starting fresh: {}", e);
                Leaderboard::new()
            }
        };
        Self { board, store }
    }

    /// Insert a score and persist the whole board
    ///
    /// A failed save is logged and otherwise ignored; the in-memory board
    /// keeps the new entry and the next insert writes it again.
    pub fn insert(&mut self, name: &str, score: u64) -> Option<usize> {
        let rank = self.board.insert(name, score);
        if let Err(e) = self.save() {
            log::warn!("High scores not saved: {}", e);
        }
        rank
    }

    /// Write the current board through the store
    pub fn save(&mut self) -> Result<(), crate::error::PersistError> {
        self.store.save(self.board.entries())?;
        log::info!("High scores saved ({} entries)", self.board.len());
        Ok(())
    }

    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        self.board.entries()
    }
}

impl std::fmt::Debug for LeaderboardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardStore")
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}
