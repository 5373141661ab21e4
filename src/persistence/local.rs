//! Browser LocalStorage

use super::{RankingStore, Result, StoreError, decode_rankings, encode_rankings};
use crate::highscores::RankEntry;
use crate::settings::Settings;

/// LocalStorage key for settings
const SETTINGS_KEY: &str = "retro_breaker_settings";

fn storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
        .local_storage()
        .map_err(|_| StoreError::Unavailable("localStorage access denied".to_string()))?
        .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
}

fn get_item(key: &str) -> Result<Option<String>> {
    storage()?
        .get_item(key)
        .map_err(|_| StoreError::Unavailable(format!("cannot read '{}'", key)))
}

fn set_item(key: &str, value: &str) -> Result<()> {
    storage()?
        .set_item(key, value)
        .map_err(|_| StoreError::Unavailable(format!("cannot write '{}'", key)))
}

/// Rankings stored under one LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "retro_breaker_rankings";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl RankingStore for LocalStorageStore {
    fn load(&self) -> Result<Vec<RankEntry>> {
        match get_item(&self.key)? {
            Some(json) => decode_rankings(&json),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[RankEntry]) -> Result<()> {
        set_item(&self.key, &encode_rankings(entries)?)?;
        log::info!("Rankings saved ({} entries)", entries.len());
        Ok(())
    }
}

impl Settings {
    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        let loaded = get_item(SETTINGS_KEY).and_then(|json| match json {
            Some(json) => Ok(Some(serde_json::from_str::<Settings>(&json)?)),
            None => Ok(None),
        });
        match loaded {
            Ok(Some(mut settings)) => {
                settings.sanitize();
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        set_item(SETTINGS_KEY, &serde_json::to_string(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
