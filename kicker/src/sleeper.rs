//! Sleep abstraction for testable poll loops.
//!
//! This module provides a `Sleeper` trait for abstracting sleep operations,
//! allowing the poll loop to be tested without actual delays.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use kicker_clock::MockClock;

/// Trait for sleeping between poll ticks.
pub trait Sleeper: Send + Sync {
    /// Sleep for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Real sleeper that uses `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSleeper;

impl RealSleeper {
    /// Create a new real sleeper.
    pub fn new() -> Self {
        Self
    }
}

impl Sleeper for RealSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Mock sleeper for testing - returns immediately.
///
/// Counts its calls, and when built with `advancing` moves a `MockClock`
/// forward by each requested duration so deadlines pass as they would in
/// real time.
#[derive(Debug, Default, Clone)]
pub struct MockSleeper {
    clock: Option<MockClock>,
    sleeps: Arc<AtomicUsize>,
}

impl MockSleeper {
    /// Create a sleeper that leaves time alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sleeper that advances `clock` by every slept duration.
    pub fn advancing(clock: MockClock) -> Self {
        Self {
            clock: Some(clock),
            sleeps: Arc::default(),
        }
    }

    /// Number of sleeps so far.
    pub fn sleeps(&self) -> usize {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl Sleeper for MockSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        if let Some(clock) = &self.clock {
            clock.advance(duration);
        }
    }
}
