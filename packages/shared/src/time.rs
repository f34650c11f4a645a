//! Time-related utilities with clock abstraction for testability.
//!
//! All timestamps in hiroba are UTC Unix milliseconds. The real-time layer
//! computes poll look-back windows by subtracting from "now", so the clock
//! is injected as a trait and tests pin it with [`FixedClock`].

use chrono::Utc;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_utc_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn now_utc_millis() -> i64 {
    Utc::now().timestamp_millis()
}
