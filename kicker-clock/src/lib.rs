//! Clock abstraction for calico-kicker.
//!
//! The poll loop measures its deadline against a monotonic clock. Real and
//! mock implementations are provided so the loop can be tested without
//! waiting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Trait for reading monotonic time.
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin. Never goes backwards.
    fn now(&self) -> Duration;
}

/// Real monotonic clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Mock clock for testing, moved forward by hand.
///
/// Clones share the same time, so a test can keep one handle and advance it
/// while the code under test reads from another.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    nanos: Arc<AtomicU64>,
}

impl MockClock {
    /// Create a mock clock reading `start`.
    pub fn new(start: Duration) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(start.as_nanos() as u64)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.nanos
            .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

/// Mock clock that auto-advances time on each call.
///
/// Useful for testing time-sensitive loops where the clock needs to progress.
#[derive(Debug)]
pub struct AdvancingClock {
    nanos: AtomicU64,
    increment: u64,
}

impl AdvancingClock {
    /// Create an advancing clock starting at `start` and moving by `increment` each call.
    pub fn new(start: Duration, increment: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(start.as_nanos() as u64),
            increment: increment.as_nanos() as u64,
        }
    }
}

impl Clock for AdvancingClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.fetch_add(self.increment, Ordering::SeqCst))
    }
}
