//! Trailing-edge debounce over a millisecond clock
//!
//! Timestamps are plain `f64` milliseconds (`performance.now()` in the
//! browser) since `std::time::Instant` is unavailable on wasm32. The caller
//! owns the timer: it re-arms it for the deadline returned by every
//! [`Debouncer::trigger`] and calls [`Debouncer::flush`] when it fires.

use std::time::Duration;

/// Holds the most recent trigger until the quiet period elapses.
/// Earlier triggers within the window are dropped, not queued.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: f64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay_ms: delay.as_micros() as f64 / 1000.0,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet period. Returns the new deadline.
    pub fn trigger(&mut self, value: T, now_ms: f64) -> f64 {
        self.pending = Some(value);
        now_ms + self.delay_ms
    }

    /// Take the pending value once the timer armed for the last deadline fires
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }
}
