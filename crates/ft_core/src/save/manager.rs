//! Stored files: atomic writes, fail-soft reads.
//!
//! The session snapshot and the roster library live in separate files under
//! one directory. Writes go to a temp file, are fsynced and renamed into
//! place, so a crash never leaves a half-written save. Reads fail soft: any
//! problem is logged and the caller proceeds with defaults.

use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::error::SaveError;
use super::format::{decode_snapshot, encode_snapshot, SessionSnapshot};
use super::rosters::RosterLibrary;

const SESSION_FILE: &str = "session.dat";
const ROSTERS_FILE: &str = "rosters.dat";

pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    pub fn rosters_path(&self) -> PathBuf {
        self.dir.join(ROSTERS_FILE)
    }

    // ========================
    // Session snapshot
    // ========================

    pub fn store_session(&self, snapshot: &SessionSnapshot) -> Result<(), SaveError> {
        let data = encode_snapshot(snapshot)?;
        write_atomic(&self.session_path(), &data)?;
        log::debug!("session snapshot stored ({} bytes)", data.len());
        Ok(())
    }

    pub fn load_session(&self) -> Result<SessionSnapshot, SaveError> {
        let data = read_file(&self.session_path())?;
        decode_snapshot(&data)
    }

    /// Fail-soft load: a missing or unreadable snapshot yields `None` and
    /// the engine proceeds with defaults.
    pub fn try_load_session(&self) -> Option<SessionSnapshot> {
        match self.load_session() {
            Ok(snapshot) => Some(snapshot),
            Err(SaveError::FileNotFound { .. }) => None,
            Err(err) => {
                log::warn!("ignoring stored session: {}", err);
                None
            }
        }
    }

    pub fn session_exists(&self) -> bool {
        self.session_path().exists()
    }

    pub fn delete_session(&self) -> Result<(), SaveError> {
        let path = self.session_path();
        if path.exists() {
            remove_file(&path)?;
        }
        Ok(())
    }

    // ========================
    // Roster library
    // ========================

    pub fn store_rosters(&self, library: &RosterLibrary) -> Result<(), SaveError> {
        let data = super::format::encode(library)?;
        write_atomic(&self.rosters_path(), &data)?;
        log::debug!("roster library stored ({} rosters)", library.len());
        Ok(())
    }

    /// Fail-soft load: any problem yields an empty library.
    pub fn load_rosters(&self) -> RosterLibrary {
        let path = self.rosters_path();
        let data = match read_file(&path) {
            Ok(data) => data,
            Err(SaveError::FileNotFound { .. }) => return RosterLibrary::default(),
            Err(err) => {
                log::warn!("ignoring roster library: {}", err);
                return RosterLibrary::default();
            }
        };
        match super::format::decode(&data) {
            Ok(library) => library,
            Err(err) => {
                log::warn!("ignoring roster library: {}", err);
                RosterLibrary::default()
            }
        }
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Write to a temp file, then rename over the target.
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.flush()?;

        // sync_all ensures data is on disk before the rename (portable fsync)
        file.sync_all()?;
    }
    rename(&temp_path, path)?;
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, SaveError> {
    if !path.exists() {
        return Err(SaveError::FileNotFound { path: path.display().to_string() });
    }
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameFormat;
    use crate::save::{PlayerName, StoredRoster, SNAPSHOT_VERSION};
    use tempfile::TempDir;

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
            timeouts_used: 0,
            overtimes: 0,
            ot_elapsed_ms: 0,
        }
    }

    #[test]
    fn test_store_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path());

        let snapshot = sample_snapshot();
        manager.store_session(&snapshot).unwrap();

        let loaded = manager.load_session().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path());

        manager.store_session(&sample_snapshot()).unwrap();
        assert!(manager.session_path().exists());
        assert!(!manager.session_path().with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_session_fails_soft() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path());
        assert!(!manager.session_exists());
        assert!(manager.try_load_session().is_none());
    }

    #[test]
    fn test_corrupt_session_fails_soft() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path());

        manager.store_session(&sample_snapshot()).unwrap();
        let mut bytes = std::fs::read(manager.session_path()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        std::fs::write(manager.session_path(), &bytes).unwrap();

        assert!(manager.try_load_session().is_none());
    }

    #[test]
    fn test_roster_library_roundtrip() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path());

        let mut library = RosterLibrary::default();
        library.save_roster(
            "U12",
            StoredRoster {
                num_players: 8,
                on_court: 5,
                players: (1..=8).map(|i| PlayerName { name: format!("Kid {}", i) }).collect(),
            },
        );
        manager.store_rosters(&library).unwrap();

        let loaded = manager.load_rosters();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("U12").unwrap().num_players, 8);
    }

    #[test]
    fn test_missing_roster_library_is_empty() {
        let dir = TempDir::new().unwrap();
        let manager = SaveManager::new(dir.path());
        assert!(manager.load_rosters().is_empty());
    }
}
