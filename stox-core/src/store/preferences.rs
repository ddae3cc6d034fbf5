//! Preferences file: a small JSON key-value store of named string sets.

use super::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct PreferenceMap(BTreeMap<String, BTreeSet<String>>);

/// Handle to a preferences file on disk.
///
/// Reads and writes go straight to the file; nothing is held in memory
/// between calls. Not safe for concurrent writers: the last save wins.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a string set. `None` if the key (or the file) does not exist.
    pub fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        self.load().0.remove(key)
    }

    /// Replace a string set, keeping every other key in the file.
    pub fn put_string_set(&self, key: &str, values: BTreeSet<String>) -> Result<(), StoreError> {
        let mut map = self.load();
        map.0.insert(key.to_string(), values);
        self.save(&map)
    }

    /// Load the whole map. Missing or corrupt files read as empty.
    fn load(&self) -> PreferenceMap {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), "ignoring corrupt preferences file: {e}");
                PreferenceMap::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PreferenceMap::default(),
            Err(e) => {
                warn!(path = %self.path.display(), "cannot read preferences file: {e}");
                PreferenceMap::default()
            }
        }
    }

    fn save(&self, map: &PreferenceMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
