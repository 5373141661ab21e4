//! Ranking table and end-of-run name entry
//!
//! Keeps the top 10 runs sorted by score. Equal scores keep the order they
//! were recorded in.

use serde::{Deserialize, Serialize};

/// Maximum number of ranking entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest name the player may enter
pub const MAX_NAME_LEN: usize = 8;

/// A single ranking entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub name: String,
    pub score: u64,
    /// Stage reached
    pub stage: u32,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
}

/// Ranking table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RankEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Rebuild from stored rows, restoring order and length
    pub fn from_entries(mut entries: Vec<RankEntry>) -> Self {
        // Stable sort keeps recording order among ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score would make the table
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Record a run. Returns the 1-indexed rank, or None if it fell off the
    /// bottom of a full table.
    pub fn add(&mut self, entry: RankEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // After every existing entry with an equal or higher score
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Name being typed after a run ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Accepts A-Z, 0-9 and space; lowercase is folded up. Returns false if
    /// the character was rejected or the name is full.
    pub fn push(&mut self, c: char) -> bool {
        let c = c.to_ascii_uppercase();
        if !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' ') {
            return false;
        }
        if self.text.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// A name is required to submit
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
