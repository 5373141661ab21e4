//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging bootstrap
//! - Wall-clock seed and calendar date
//! - Frame time to fixed ticks (`time::FrameClock`)

pub mod time;

use chrono::{DateTime, Utc};

pub use time::FrameClock;

/// Install the logger. Native reads `RUST_LOG` (default `info`); the browser
/// build logs to the console and routes panics there too.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Seed for a new run from the wall clock
pub fn seed_from_clock() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Today's date as `YYYY-MM-DD` (UTC)
pub fn today() -> String {
    date_stamp(Utc::now())
}

/// Calendar date stamp stored with ranking entries
pub fn date_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
