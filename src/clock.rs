//! # Frame Clock
//!
//! Elapsed time for the active background. Time comes from an injected
//! [`TimeSource`] so renders are reproducible in tests; swapping backgrounds
//! calls [`FrameClock::rebase`] so every background starts at zero.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A monotonic clock in seconds.
pub trait TimeSource: Send + Sync {
    fn now_seconds(&self) -> f64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(seconds: f64) -> Self {
        let clock = Self::default();
        clock.set(seconds);
        clock
    }

    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, seconds: f64) {
        self.set(self.now_seconds() + seconds);
    }
}

impl TimeSource for ManualClock {
    fn now_seconds(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Seconds since the active background started.
#[derive(Debug)]
pub struct FrameClock<S: TimeSource = SystemClock> {
    source: S,
    start: f64,
}

impl FrameClock<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<S: TimeSource> FrameClock<S> {
    /// Start counting from the source's current time.
    pub fn new(source: S) -> Self {
        let start = source.now_seconds();
        Self { source, start }
    }

    /// Seconds since the last rebase. Never negative, even if the source
    /// steps backwards.
    pub fn elapsed(&self) -> f32 {
        (self.source.now_seconds() - self.start).max(0.0) as f32
    }

    /// Restart from zero. Called when the background changes.
    pub fn rebase(&mut self) {
        self.start = self.source.now_seconds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_elapsed() {
        let source = ManualClock::new(100.0);
        let clock = FrameClock::new(source.clone());
        assert_eq!(clock.elapsed(), 0.0);
        source.advance(2.5);
        assert_eq!(clock.elapsed(), 2.5);
    }

    #[test]
    fn test_rebase_restarts() {
        let source = ManualClock::new(0.0);
        let mut clock = FrameClock::new(source.clone());
        source.set(10.0);
        clock.rebase();
        assert_eq!(clock.elapsed(), 0.0);
        source.advance(1.0);
        assert_eq!(clock.elapsed(), 1.0);
    }

    #[test]
    fn test_never_negative() {
        let source = ManualClock::new(50.0);
        let clock = FrameClock::new(source.clone());
        source.set(10.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = FrameClock::system();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a && a >= 0.0);
    }
}
