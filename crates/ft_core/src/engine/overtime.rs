//! Independent overtime clock.
//!
//! Same tick contract as the main clock (sample, clamp to the remainder,
//! accrue), but over a single fixed-cap pseudo-period and with no player
//! fan-out. Runs and resets independently of the game clock.

use crate::engine::ticker::ClockTicker;

/// Fixed overtime length.
pub const OVERTIME_CAP_MS: u64 = 3 * 60 * 1000;

#[derive(Debug)]
pub struct OvertimeClock {
    elapsed_ms: u64,
    running: bool,
    ticker: ClockTicker,
}

impl OvertimeClock {
    pub fn new(ticker: ClockTicker) -> Self {
        Self { elapsed_ms: 0, running: false, ticker }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        OVERTIME_CAP_MS - self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= OVERTIME_CAP_MS
    }

    /// Start the overtime clock; refused once the cap is reached.
    pub fn start(&mut self) -> bool {
        if self.running {
            return true;
        }
        if self.is_complete() {
            return false;
        }
        self.ticker.arm();
        self.running = true;
        true
    }

    pub fn pause(&mut self) {
        self.ticker.disarm();
        self.running = false;
    }

    /// Apply elapsed wall time, clamped at the cap. Auto-pauses when the
    /// cap is reached. Returns the amount applied.
    pub fn tick(&mut self) -> u64 {
        if !self.running {
            return 0;
        }
        let delta = self.ticker.sample();
        let apply = delta.min(self.remaining_ms());
        self.elapsed_ms += apply;
        if self.is_complete() {
            self.pause();
            log::debug!("overtime complete, clock paused");
        }
        apply
    }

    pub fn reset(&mut self) {
        self.pause();
        self.elapsed_ms = 0;
    }

    /// Restore elapsed time from a stored snapshot, clamped at the cap.
    pub fn seed_elapsed(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = elapsed_ms.min(OVERTIME_CAP_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ticker::ManualClock;
    use std::sync::Arc;

    fn overtime_with_clock() -> (Arc<ManualClock>, OvertimeClock) {
        let clock = Arc::new(ManualClock::new());
        let ticker = ClockTicker::new(Box::new(Arc::clone(&clock)));
        (clock, OvertimeClock::new(ticker))
    }

    #[test]
    fn test_tick_accrues_while_running() {
        let (clock, mut ot) = overtime_with_clock();
        ot.start();
        clock.advance(30_000);
        assert_eq!(ot.tick(), 30_000);
        assert_eq!(ot.elapsed_ms(), 30_000);
        assert_eq!(ot.remaining_ms(), 150_000);
    }

    #[test]
    fn test_cap_clamps_and_pauses() {
        let (clock, mut ot) = overtime_with_clock();
        ot.start();
        clock.advance(OVERTIME_CAP_MS + 45_000);
        assert_eq!(ot.tick(), OVERTIME_CAP_MS);
        assert!(ot.is_complete());
        assert!(!ot.is_running());
        assert!(!ot.start());
    }

    #[test]
    fn test_reset_allows_restart() {
        let (clock, mut ot) = overtime_with_clock();
        ot.start();
        clock.advance(OVERTIME_CAP_MS);
        ot.tick();

        ot.reset();
        assert_eq!(ot.elapsed_ms(), 0);
        assert!(ot.start());
    }

    #[test]
    fn test_seed_clamped_at_cap() {
        let (_clock, mut ot) = overtime_with_clock();
        ot.seed_elapsed(OVERTIME_CAP_MS + 1);
        assert_eq!(ot.elapsed_ms(), OVERTIME_CAP_MS);
        assert!(ot.is_complete());
    }
}
