//! Game clock state machine.
//!
//! Two states, `Idle` and `Running`, and one transition function per tick.
//! A tick clamps the wall-clock delta to the current period's remainder,
//! advances the ledger slot and fans the same delta out to every active
//! player, all inside one `&mut` call, so a reader can never observe the
//! ledger updated without the matching accrual update. Reaching the period
//! cap auto-pauses the clock without advancing the period index.

use crate::engine::ledger::PeriodLedger;
use crate::engine::ticker::ClockTicker;
use crate::models::AccrualTable;

/// Clock lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePhase {
    #[default]
    Idle,
    Running,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock idle; nothing applied.
    Idle,
    /// Delta applied (possibly zero); clock still running.
    Applied { applied_ms: u64 },
    /// Delta applied and the period reached its cap; clock auto-paused.
    PeriodComplete { applied_ms: u64 },
}

/// The main game clock: period ledger, current-period cursor and ticker.
#[derive(Debug)]
pub struct GameClockEngine {
    phase: EnginePhase,
    current_period: usize,
    ledger: PeriodLedger,
    ticker: ClockTicker,
}

impl GameClockEngine {
    pub fn new(period_count: usize, period_length_ms: u64, ticker: ClockTicker) -> Self {
        Self {
            phase: EnginePhase::Idle,
            current_period: 0,
            ledger: PeriodLedger::new(period_count, period_length_ms),
            ticker,
        }
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == EnginePhase::Running
    }

    /// Index of the period the clock is accruing into.
    pub fn current_period(&self) -> usize {
        self.current_period
    }

    pub fn ledger(&self) -> &PeriodLedger {
        &self.ledger
    }

    /// Start the clock. Refused while the current period is already at its
    /// cap; advance the period first. Arming the ticker here means wall
    /// time spent paused is never accrued.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return true;
        }
        if self.ledger.is_complete(self.current_period) {
            log::debug!("start refused: period {} already complete", self.current_period + 1);
            return false;
        }
        self.ticker.arm();
        self.phase = EnginePhase::Running;
        true
    }

    pub fn pause(&mut self) {
        self.ticker.disarm();
        self.phase = EnginePhase::Idle;
    }

    /// Force-pause and move the cursor to the next period, clamped to the
    /// last index. Never wraps and never skips.
    pub fn advance_period(&mut self) {
        self.pause();
        let last = self.ledger.period_count().saturating_sub(1);
        if self.current_period < last {
            self.current_period += 1;
        }
    }

    /// One atomic accounting transition.
    ///
    /// Samples the wall clock, clamps the delta to the period remainder,
    /// moves the ledger slot and every active player's accrual together,
    /// then auto-pauses if the period just completed.
    pub fn tick(&mut self, roster: &mut AccrualTable) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        let delta = self.ticker.sample();
        let applied = self.ledger.record_delta(self.current_period, delta);
        if applied > 0 {
            roster.apply_delta(self.current_period, applied);
        }

        if self.ledger.is_complete(self.current_period) {
            self.pause();
            log::debug!("period {} complete, clock paused", self.current_period + 1);
            return TickOutcome::PeriodComplete { applied_ms: applied };
        }
        TickOutcome::Applied { applied_ms: applied }
    }

    /// Zero the ledger and all player accrual, rewind to period 0, stop.
    pub fn reset(&mut self, roster: &mut AccrualTable) {
        self.pause();
        self.ledger.reset();
        roster.reset_accrual();
        self.current_period = 0;
    }

    /// Reconcile with a new period count/length after a config change. The
    /// cursor is clamped into the new range; a period completed by a shorter
    /// length pauses the clock on the spot.
    pub fn reshape(&mut self, period_count: usize, period_length_ms: u64) {
        self.ledger.reshape(period_count);
        self.ledger.set_period_length_ms(period_length_ms);
        self.current_period = self.current_period.min(period_count.saturating_sub(1));
        if self.is_running() && self.ledger.is_complete(self.current_period) {
            self.pause();
        }
    }
}
