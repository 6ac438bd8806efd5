//! Domain data types: configuration, roster and timeout counters.

pub mod config;
pub mod roster;
pub mod timeout;

pub use config::{GameConfig, GameFormat};
pub use roster::{AccrualTable, CapacityPolicy, Player, ToggleOutcome};
pub use timeout::{TimeoutLedger, BASE_TIMEOUTS};
