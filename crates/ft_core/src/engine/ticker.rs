//! Wall-clock sampling for the game and overtime clocks.
//!
//! The engine never reads the system clock directly. A [`TimeSource`] hands
//! out monotonic millisecond readings and [`ClockTicker`] turns consecutive
//! readings into non-negative deltas. Deltas come from sample pairs rather
//! than a fixed tick size, so a late poll (background tab, busy host) still
//! accounts for all elapsed time in one go. Tests drive a [`ManualClock`]
//! instead of waiting on real wall time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Suggested host polling cadence (milliseconds).
pub const POLL_INTERVAL_MS: u64 = 250;

/// Polls per second at the suggested cadence.
pub const POLLS_PER_SECOND: u64 = 1000 / POLL_INTERVAL_MS;

// Compile-time validation
const _: () = assert!(POLL_INTERVAL_MS * POLLS_PER_SECOND == 1000);

/// Monotonic millisecond time source.
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Real wall clock, anchored at creation.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Deterministic clock advanced manually during tests and simulations.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Set an absolute reading. Setting an earlier value models a clock
    /// anomaly; the ticker converts it into a zero-time delta.
    pub fn set(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Turns consecutive time-source readings into clamped deltas.
///
/// Owns no domain state: just the source and the previous reading.
pub struct ClockTicker {
    source: Box<dyn TimeSource>,
    last_sample_ms: Option<u64>,
}

impl ClockTicker {
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        Self { source, last_sample_ms: None }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemClock::new()))
    }

    /// Re-anchor at the current reading. Wall time spent before arming
    /// (e.g. while the clock was paused) is never converted into a delta.
    pub fn arm(&mut self) {
        self.last_sample_ms = Some(self.source.now_ms());
    }

    pub fn disarm(&mut self) {
        self.last_sample_ms = None;
    }

    /// Milliseconds since the previous sample. A backwards jump in the
    /// source yields zero, and an unarmed ticker arms itself and yields
    /// zero, so a bad reading never subtracts time.
    pub fn sample(&mut self) -> u64 {
        let now = self.source.now_ms();
        let delta = match self.last_sample_ms {
            Some(previous) => now.saturating_sub(previous),
            None => 0,
        };
        self.last_sample_ms = Some(now);
        delta
    }
}

impl std::fmt::Debug for ClockTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockTicker").field("last_sample_ms", &self.last_sample_ms).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_ticker() -> (Arc<ManualClock>, ClockTicker) {
        let clock = Arc::new(ManualClock::new());
        let ticker = ClockTicker::new(Box::new(Arc::clone(&clock)));
        (clock, ticker)
    }

    #[test]
    fn test_sample_returns_elapsed_since_previous() {
        let (clock, mut ticker) = manual_ticker();
        ticker.arm();
        clock.advance(250);
        assert_eq!(ticker.sample(), 250);
        clock.advance(1_000);
        assert_eq!(ticker.sample(), 1_000);
    }

    #[test]
    fn test_unarmed_sample_is_zero() {
        let (clock, mut ticker) = manual_ticker();
        clock.advance(5_000);
        assert_eq!(ticker.sample(), 0);
        clock.advance(100);
        assert_eq!(ticker.sample(), 100);
    }

    #[test]
    fn test_arming_skips_paused_time() {
        let (clock, mut ticker) = manual_ticker();
        ticker.arm();
        clock.advance(250);
        assert_eq!(ticker.sample(), 250);

        ticker.disarm();
        clock.advance(60_000); // paused for a minute
        ticker.arm();
        clock.advance(250);
        assert_eq!(ticker.sample(), 250);
    }

    #[test]
    fn test_backwards_jump_yields_zero() {
        let (clock, mut ticker) = manual_ticker();
        clock.set(10_000);
        ticker.arm();
        clock.set(4_000);
        assert_eq!(ticker.sample(), 0);
        // Recovery: the anomalous reading becomes the new anchor.
        clock.set(4_500);
        assert_eq!(ticker.sample(), 500);
    }
}
