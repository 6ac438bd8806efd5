//! Snapshot persistence and the roster library.
//!
//! The engine only ever hands this layer point-in-time snapshots of
//! configuration, names and counters, never live accrual data mid-tick.

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;
pub mod rosters;

pub use error::SaveError;
pub use format::{
    current_timestamp_ms, decode_snapshot, encode_snapshot, PlayerName, SessionSnapshot,
    StoredRoster,
};
pub use manager::SaveManager;
pub use rosters::RosterLibrary;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;
