//! Named roster library.
//!
//! A separate mapping from roster name to stored names and shape, saved and
//! deleted only by explicit user action. Loading one into a session resets
//! all runtime accrual state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::StoredRoster;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterLibrary {
    rosters: BTreeMap<String, StoredRoster>,
}

impl RosterLibrary {
    pub fn len(&self) -> usize {
        self.rosters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rosters.is_empty()
    }

    /// Stored names, sorted, for a picker UI.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rosters.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&StoredRoster> {
        self.rosters.get(name)
    }

    /// Iterate stored rosters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredRoster)> {
        self.rosters.iter().map(|(name, roster)| (name.as_str(), roster))
    }

    /// Insert or overwrite a named roster.
    pub fn save_roster(&mut self, name: impl Into<String>, roster: StoredRoster) {
        self.rosters.insert(name.into(), roster);
    }

    /// Remove a named roster. Returns false when the name is unknown.
    pub fn delete(&mut self, name: &str) -> bool {
        self.rosters.remove(name).is_some()
    }
}
