//! Ranking and settings persistence
//!
//! The game only talks to a `RankingStore`. Failures are reported, never
//! fatal: the caller logs them and keeps playing with what it has.
//! - `MemoryStore`: in-process, for tests and headless runs
//! - `JsonFileStore`: a JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use crate::highscores::RankEntry;

/// Error type for store operations
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backing storage cannot be reached (no window, storage disabled, quota)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Where the ranking table lives between sessions
pub trait RankingStore {
    /// Stored rows. A store that has never been written returns an empty list.
    fn load(&self) -> Result<Vec<RankEntry>>;

    fn save(&mut self, entries: &[RankEntry]) -> Result<()>;
}

/// Keeps rankings in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<RankEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<RankEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }
}

impl RankingStore for MemoryStore {
    fn load(&self) -> Result<Vec<RankEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[RankEntry]) -> Result<()> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

/// Parse a stored ranking payload
pub fn decode_rankings(json: &str) -> Result<Vec<RankEntry>> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_rankings(entries: &[RankEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}
