//! # ft_core - Fair-Play Game Clock Engine
//!
//! A live game-clock and playing-time accounting engine for team sports
//! played in fixed periods (quarters or halves). Tracks how much wall-clock
//! time each roster player has spent on court, enforces the period
//! accounting invariants, and derives the fairness baselines used to guide
//! substitutions.
//!
//! ## Features
//! - Delta-based clock: late polls never lose or double-count time
//! - One atomic accounting transition per tick (ledger + player fan-out)
//! - Derived fairness metrics recomputed on read, never cached
//! - Fail-soft snapshot persistence and a named roster library
//! - CSV export of the playing-time table

pub mod api;
pub mod engine;
pub mod export;
pub mod models;
pub mod save;
pub mod session;

// Re-export the engine surface
pub use engine::{
    compute_fairness, time_delta_ms, Baseline, ClockTicker, EnginePhase, FairnessReport,
    GameClockEngine, ManualClock, OvertimeClock, PeriodLedger, SystemClock, TickOutcome,
    TimeSource, OVERTIME_CAP_MS, POLL_INTERVAL_MS,
};

// Re-export domain types
pub use models::{
    AccrualTable, CapacityPolicy, GameConfig, GameFormat, Player, TimeoutLedger, ToggleOutcome,
};

// Re-export the session and persistence surface
pub use api::{session_state_json, session_view, SessionView};
pub use save::{RosterLibrary, SaveError, SaveManager, SessionSnapshot, StoredRoster};
pub use session::GameSession;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
