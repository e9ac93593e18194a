//! Delay policies applied before every remote read.

use std::thread;
use std::time::Duration;

use rand::Rng;

/// Runs before each remote read
pub trait ReadPacing {
    fn before_read(&self);
}

/// No delay at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl ReadPacing for NoPacing {
    fn before_read(&self) {}
}

/// Sleeps a uniformly random duration before each read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitteredPacing {
    min: Duration,
    max: Duration,
}

impl JitteredPacing {
    /// Default lower bound (microseconds)
    pub const DEFAULT_MIN_US: u64 = 69;
    /// Default upper bound (microseconds)
    pub const DEFAULT_MAX_US: u64 = 333;

    /// Create a policy sleeping between `min_us` and `max_us` microseconds.
    ///
    /// Reversed bounds are swapped.
    pub fn new(min_us: u64, max_us: u64) -> Self {
        let (lo, hi) = if min_us <= max_us {
            (min_us, max_us)
        } else {
            (max_us, min_us)
        };
        Self {
            min: Duration::from_micros(lo),
            max: Duration::from_micros(hi),
        }
    }

    /// Pick the next delay
    pub fn next_delay(&self) -> Duration {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for JitteredPacing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_US, Self::DEFAULT_MAX_US)
    }
}

impl ReadPacing for JitteredPacing {
    fn before_read(&self) {
        thread::sleep(self.next_delay());
    }
}
