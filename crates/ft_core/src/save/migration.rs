//! Snapshot format migrations.
//!
//! Older snapshots are upgraded in place when loaded. Version 1 is the
//! first released format, so today this is a pass-through; new versions add
//! a step here instead of breaking old saves.

use super::error::SaveError;
use super::format::SessionSnapshot;
use super::SNAPSHOT_VERSION;

pub fn migrate_snapshot(snapshot: SessionSnapshot) -> Result<SessionSnapshot, SaveError> {
    match snapshot.version {
        SNAPSHOT_VERSION => Ok(snapshot),
        // No historical versions yet; anything else is unknown.
        found => Err(SaveError::VersionMismatch { found, expected: SNAPSHOT_VERSION }),
    }
}
