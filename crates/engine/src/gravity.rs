//! Drop timer for the gravity tick.
//!
//! Time is whatever unit the host feeds `tick` with; the browser passes
//! milliseconds from `requestAnimationFrame`.

pub const DEFAULT_DROP_INTERVAL_MS: u32 = 1000;

/// Accumulates elapsed time and fires once it reaches the interval.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTimer {
    interval_ms: f64,
    accumulated_ms: f64,
}

impl DropTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            accumulated_ms: 0.0,
        }
    }

    /// Add `elapsed_ms`; true when a drop is due. At most one drop per call,
    /// however long the frame was. Negative or NaN deltas count as zero.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        if elapsed_ms > 0.0 {
            self.accumulated_ms += elapsed_ms;
        }
        self.accumulated_ms >= self.interval_ms
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }
}

impl Default for DropTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DROP_INTERVAL_MS)
    }
}
