//! JSON-file state store mapping task ids to last-known snapshots.
//!
//! The file is a JSON array of `[gid, snapshot]` pairs, loaded once at
//! startup and rewritten wholesale after every reconciliation pass. It is a
//! cache: Asana stays authoritative, so a write lost to a crash only costs
//! one cycle of duplicate work.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::TaskSnapshot;
use crate::{AppError, Result};

/// In-memory task state backed by a single JSON file.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    entries: HashMap<String, TaskSnapshot>,
}

impl StateStore {
    /// Load the store from `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: HashMap::new(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|err| {
            AppError::Store(format!("cannot read {}: {err}", path.display()))
        })?;
        let pairs: Vec<(String, TaskSnapshot)> = serde_json::from_str(&raw).map_err(|err| {
            AppError::Store(format!("cannot parse {}: {err}", path.display()))
        })?;

        Ok(Self {
            path,
            entries: pairs.into_iter().collect(),
        })
    }

    /// Rewrite the whole store to its backing file.
    ///
    /// Entries are written sorted by task id so the file is deterministic.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if serialization or the write fails.
    pub fn save(&self) -> Result<()> {
        let mut pairs: Vec<(&String, &TaskSnapshot)> = self.entries.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let json = serde_json::to_string_pretty(&pairs)?;
        fs::write(&self.path, json).map_err(|err| {
            AppError::Store(format!("cannot write {}: {err}", self.path.display()))
        })
    }

    /// Look up the snapshot for a task id.
    #[must_use]
    pub fn get(&self, gid: &str) -> Option<&TaskSnapshot> {
        self.entries.get(gid)
    }

    /// Insert or replace the snapshot for a task id.
    pub fn insert(&mut self, gid: impl Into<String>, snapshot: TaskSnapshot) {
        self.entries.insert(gid.into(), snapshot);
    }

    /// Number of tracked tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store tracks no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
