//! Tick machinery: time sampling, the period ledger, the game clock state
//! machine, the independent overtime clock and the derived fairness metrics.

pub mod clock;
pub mod ledger;
pub mod metrics;
pub mod overtime;
pub mod ticker;


pub use clock::{EnginePhase, GameClockEngine, TickOutcome};
pub use ledger::PeriodLedger;
pub use metrics::{compute_fairness, time_delta_ms, Baseline, FairnessReport};
pub use overtime::{OvertimeClock, OVERTIME_CAP_MS};
pub use ticker::{ClockTicker, ManualClock, SystemClock, TimeSource, POLL_INTERVAL_MS};
