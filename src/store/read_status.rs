//! The persistent read-status side store.
//!
//! A two-column CSV file (`key,read`) mapping stable item keys to read
//! flags. The store is a convenience layer under the dashboard: it must
//! never block the primary listing, so `load` degrades to an empty mapping
//! on any corruption instead of surfacing an error, and resets the file so
//! the next session starts clean.
//!
//! `mark_read` is a read-modify-write cycle with no locking. Two sessions
//! toggling concurrently race, and the later save silently wins. That is
//! the documented contract for a single-operator tool; a file lock or an
//! embedded key-value store would be the upgrade path if it ever stops
//! being acceptable.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced by store creation and writes.
///
/// Read-side corruption is intentionally absent from the public surface:
/// `load` recovers from it locally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access read-status store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode read-status store: {0}")]
    Csv(#[from] csv::Error),
}

/// Internal load failure; always recovered, never returned to callers.
#[derive(Debug, Error)]
enum CorruptStore {
    #[error("unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed row: {0}")]
    Row(String),
}

// ============================================================================
// ReadStatusStore
// ============================================================================

const HEADER: [&str; 2] = ["key", "read"];

/// Handle to the read-status file. Cheap to construct; every operation
/// opens the file fresh so multiple sessions see each other's saves.
#[derive(Debug, Clone)]
pub struct ReadStatusStore {
    path: PathBuf,
}

impl ReadStatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Guarantee the backing file exists, creating parent directories and an
    /// empty (header-only) store if absent. Existing contents are untouched.
    pub fn ensure(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.write_atomic(&HashMap::new())?;
        tracing::info!(path = %self.path.display(), "Created empty read-status store");
        Ok(())
    }

    /// Read the full mapping, deduplicating by key with the last occurrence
    /// winning.
    ///
    /// Never fails the caller: a missing file is an empty mapping, and an
    /// unreadable or malformed file is logged, reset to empty on disk, and
    /// returned as an empty mapping. Losing read flags is acceptable;
    /// blocking the dashboard is not.
    pub fn load(&self) -> HashMap<String, bool> {
        match self.try_load() {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Read-status store corrupt, resetting to empty"
                );
                if let Err(reset_err) = self.write_atomic(&HashMap::new()) {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %reset_err,
                        "Failed to reset corrupt read-status store"
                    );
                }
                HashMap::new()
            }
        }
    }

    fn try_load(&self) -> Result<HashMap<String, bool>, CorruptStore> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut map = HashMap::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let key = record.get(0).map(str::trim).unwrap_or_default();
            let Some(raw) = record.get(1).map(str::trim) else {
                return Err(CorruptStore::Row(format!(
                    "row {}: expected 2 fields, found {}",
                    row + 1,
                    record.len()
                )));
            };
            if key.is_empty() {
                return Err(CorruptStore::Row(format!("row {}: empty key", row + 1)));
            }
            let read = match raw {
                "true" | "1" => true,
                "false" | "0" => false,
                other => {
                    return Err(CorruptStore::Row(format!(
                        "row {}: unrecognized flag {:?}",
                        row + 1,
                        other
                    )));
                }
            };
            // Last occurrence wins
            map.insert(key.to_string(), read);
        }
        Ok(map)
    }

    /// Persist the full mapping. The write goes to a temp file in the same
    /// directory, is synced, then renamed over the store path, so a
    /// concurrent reader sees either the old or the new complete state.
    /// Rows are written in sorted key order, making saves deterministic.
    pub fn save(&self, map: &HashMap<String, bool>) -> Result<(), StoreError> {
        self.write_atomic(map)
    }

    /// Upsert a single flag: load current state, set, save.
    ///
    /// Last-writer-wins across concurrent sessions; see the module docs.
    pub fn mark_read(&self, key: &str, read: bool) -> Result<(), StoreError> {
        let mut map = self.load();
        map.insert(key.to_string(), read);
        self.save(&map)?;
        tracing::debug!(key = %key, read, "Persisted read flag");
        Ok(())
    }

    fn write_atomic(&self, map: &HashMap<String, bool>) -> Result<(), StoreError> {
        // Randomized temp name in the destination directory so rename stays
        // on one filesystem and a concurrent writer cannot collide.
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = self.path.with_extension(format!("tmp.{:016x}", nanos));

        let result = self.write_to_temp(&temp_path, map).and_then(|()| {
            // On Windows, rename fails if the destination exists
            #[cfg(windows)]
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            fs::rename(&temp_path, &self.path)?;
            Ok(())
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn write_to_temp(
        &self,
        temp_path: &Path,
        map: &HashMap<String, bool>,
    ) -> Result<(), StoreError> {
        let temp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)?;

        let mut writer = csv::Writer::from_writer(temp_file);
        writer.write_record(HEADER)?;

        let mut entries: Vec<(&String, &bool)> = map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, read) in entries {
            writer.write_record([key.as_str(), if *read { "true" } else { "false" }])?;
        }

        let temp_file = writer
            .into_inner()
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        temp_file.sync_all()?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
