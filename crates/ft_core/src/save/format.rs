//! Stored-data wire format: MessagePack + LZ4 + SHA-256 checksum.
//!
//! Snapshots hold configuration, names and counters only, never live
//! accrual data. Reloading a snapshot always starts periods and player time
//! at zero.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use super::error::SaveError;
use super::SNAPSHOT_VERSION;
use crate::models::GameFormat;

/// A stored player: only the display name persists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerName {
    pub name: String,
}

/// Everything the persistence collaborator keeps between app runs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Snapshot format version for migration.
    pub version: u32,

    /// Save timestamp (unix milliseconds).
    pub saved_at_ms: u64,

    pub num_players: u32,
    pub on_court: u32,
    pub format: GameFormat,
    pub period_minutes: u32,

    pub roster_name: String,
    pub players: Vec<PlayerName>,

    pub timeouts_used: u32,
    pub overtimes: u32,
    pub ot_elapsed_ms: u64,
}

impl SessionSnapshot {
    pub fn validate(&self) -> Result<(), SaveError> {
        // A thousand-player roster is not a plausible save.
        if self.players.len() > 1000 {
            return Err(SaveError::Corrupted);
        }
        Ok(())
    }
}

/// A roster as stored in the library: names plus the shape to restore.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredRoster {
    pub num_players: u32,
    pub on_court: u32,
    pub players: Vec<PlayerName>,
}

/// Serialize, compress and checksum any stored payload.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SaveError> {
    // 1. MessagePack with field names
    let msgpack = to_vec_named(value).map_err(SaveError::Serialization)?;

    // 2. LZ4 with prepended size
    let compressed = compress_prepend_size(&msgpack);

    // 3. SHA-256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Verify, decompress and deserialize a stored payload.
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SaveError> {
    // Minimum size: LZ4 size header + checksum
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated = hasher.finalize();
    if &calculated[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    from_slice(&msgpack).map_err(SaveError::Deserialization)
}

/// Encode a session snapshot for storage.
pub fn encode_snapshot(snapshot: &SessionSnapshot) -> Result<Vec<u8>, SaveError> {
    snapshot.validate()?;
    encode(snapshot)
}

/// Decode a stored session snapshot, refusing snapshots from the future.
pub fn decode_snapshot(bytes: &[u8]) -> Result<SessionSnapshot, SaveError> {
    let snapshot: SessionSnapshot = decode(bytes)?;
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(SaveError::VersionMismatch {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    snapshot.validate()?;
    super::migration::migrate_snapshot(snapshot)
}

pub fn current_timestamp_ms() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at_ms: 1_700_000_000_000,
            num_players: 10,
            on_court: 5,
            format: GameFormat::Quarters,
            period_minutes: 8,
            roster_name: "Tigers".to_string(),
            players: (1..=10).map(|i| PlayerName { name: format!("Player {}", i) }).collect(),
            timeouts_used: 2,
            overtimes: 1,
            ot_elapsed_ms: 45_000,
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let snapshot = sample_snapshot();
        let bytes = encode_snapshot(&snapshot).unwrap();
        let decoded = decode_snapshot(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let mut bytes = encode_snapshot(&sample_snapshot()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        assert!(matches!(decode_snapshot(&bytes), Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_data_is_corrupted() {
        assert!(matches!(
            decode_snapshot(&[0u8; 10]),
            Err(SaveError::Corrupted)
        ));
    }

    #[test]
    fn test_future_version_refused() {
        let mut snapshot = sample_snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let bytes = encode(&snapshot).unwrap();
        assert!(matches!(
            decode_snapshot(&bytes),
            Err(SaveError::VersionMismatch { .. })
        ));
    }
}
