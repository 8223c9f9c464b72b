//! Mirror-store collections backed by a single JSON file.
//!
//! # Responsibility
//! - Provide the always-available fallback store that shadows the
//!   primary day-entry collection, and the scheduler-state marker file.
//!
//! # Invariants
//! - A missing or unreadable file reads as an empty collection; the
//!   mirror never refuses to serve reads.
//! - Writes are atomic at the file level (temp sibling + rename), so a
//!   crash mid-write leaves the previous contents intact.
//! - Writes that would grow the file past `max_bytes` are rejected with
//!   `CapacityExceeded`.

use crate::model::SchedulerState;
use crate::store::{
    RecordCollection, SchedulerStateStore, StoreError, StoreResult, StoredRecord,
};
use log::warn;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Default mirror size budget. The mirror is a resilience fallback, not
/// an archive; it gets localStorage-class limits.
pub const DEFAULT_MIRROR_CAPACITY_BYTES: usize = 5 * 1024 * 1024;

/// Whole-collection JSON map persisted in one file.
pub struct JsonFileCollection<T> {
    path: PathBuf,
    max_bytes: usize,
    _marker: PhantomData<T>,
}

impl<T: StoredRecord> JsonFileCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, DEFAULT_MIRROR_CAPACITY_BYTES)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> BTreeMap<String, T> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                warn!(
                    "event=mirror_read module=store status=degraded path={} error={}",
                    self.path.display(),
                    err
                );
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(err) => {
                warn!(
                    "event=mirror_read module=store status=degraded path={} error={}",
                    self.path.display(),
                    err
                );
                BTreeMap::new()
            }
        }
    }

    fn store_map(&self, map: &BTreeMap<String, T>) -> StoreResult<()> {
        let encoded = serde_json::to_string(map)?;
        if encoded.len() > self.max_bytes {
            return Err(StoreError::CapacityExceeded {
                limit_bytes: self.max_bytes,
                attempted_bytes: encoded.len(),
            });
        }

        write_atomic(&self.path, encoded.as_bytes())
    }
}

impl<T: StoredRecord> RecordCollection<T> for JsonFileCollection<T> {
    fn get(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self.load_map().remove(id))
    }

    fn put(&self, record: &T) -> StoreResult<()> {
        let mut map = self.load_map();
        map.insert(record.record_id().to_string(), record.clone());
        self.store_map(&map)
    }

    fn get_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.load_map().into_values().collect())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let mut map = self.load_map();
        if map.remove(id).is_some() {
            self.store_map(&map)?;
        }
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Single-row scheduler-state marker persisted as its own JSON file,
/// kept on the always-available side so the daily-snapshot guard works
/// even when the primary store never opens.
pub struct JsonFileSchedulerState {
    path: PathBuf,
}

impl JsonFileSchedulerState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchedulerStateStore for JsonFileSchedulerState {
    fn load(&self) -> StoreResult<SchedulerState> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SchedulerState::default())
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(err) => {
                warn!(
                    "event=scheduler_state_read module=store status=degraded path={} error={}",
                    self.path.display(),
                    err
                );
                Ok(SchedulerState::default())
            }
        }
    }

    fn save(&self, state: &SchedulerState) -> StoreResult<()> {
        let encoded = serde_json::to_string(state)?;
        write_atomic(&self.path, encoded.as_bytes())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
