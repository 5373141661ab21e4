//! Frame time to fixed simulation ticks

use crate::consts::{MAX_SUBSTEPS, TICK_MS};

/// Accumulates real elapsed time and hands out whole 16.67 ms ticks.
/// A long stall yields at most `MAX_SUBSTEPS` ticks; the rest is dropped.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `elapsed_ms` of wall time and return how many ticks to run
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let elapsed = elapsed_ms.clamp(0.0, TICK_MS * MAX_SUBSTEPS as f64);
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            self.accumulator -= TICK_MS;
            substeps += 1;
        }
        if self.accumulator >= TICK_MS {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Forget any partial tick (e.g. after the tab regains focus)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Fraction of the next tick already elapsed, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.accumulator / TICK_MS
    }
}
