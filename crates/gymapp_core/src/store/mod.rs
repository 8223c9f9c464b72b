//! Store adapters behind a common record-collection capability.
//!
//! # Responsibility
//! - Define the `RecordCollection` contract shared by the primary and
//!   mirror stores, and the adapter error taxonomy.
//! - Keep every adapter injectable so fallback logic stays testable
//!   with in-memory fakes.
//!
//! # Invariants
//! - Adapter methods report failures as `Result<_, StoreError>`; they
//!   never swallow errors themselves. Degrading is the gateway's job.
//! - A record's collection key is `record_id()`, nothing else.

use crate::db::DbError;
use crate::model::{BackupSnapshot, DayEntry, DiaryEntry, SchedulerState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_file;
pub mod memory;
pub mod sqlite;

pub use json_file::{JsonFileCollection, JsonFileSchedulerState};
pub use memory::MemoryCollection;
pub use sqlite::SqliteCollection;

pub type StoreResult<T> = Result<T, StoreError>;

/// Adapter-level failure. The gateway decides which of these degrade
/// silently and which propagate.
#[derive(Debug)]
pub enum StoreError {
    /// The primary store never opened; the operation has no backend.
    Unavailable,
    Db(DbError),
    Io(std::io::Error),
    /// Record body failed to encode or decode.
    Codec(serde_json::Error),
    /// Persisted state exists but cannot be interpreted.
    InvalidData(String),
    /// Mirror-store write would exceed its size budget.
    CapacityExceeded {
        limit_bytes: usize,
        attempted_bytes: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "primary store is unavailable"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "record body codec failure: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
            Self::CapacityExceeded {
                limit_bytes,
                attempted_bytes,
            } => write!(
                f,
                "mirror capacity exceeded: {attempted_bytes} bytes over a {limit_bytes} byte limit"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Unavailable | Self::InvalidData(_) | Self::CapacityExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Serializable record that knows its own collection key and write time.
pub trait StoredRecord: Serialize + DeserializeOwned + Clone {
    fn record_id(&self) -> &str;
    fn record_ts(&self) -> i64;
}

impl StoredRecord for DayEntry {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_ts(&self) -> i64 {
        self.ts
    }
}

impl StoredRecord for DiaryEntry {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_ts(&self) -> i64 {
        self.ts
    }
}

impl StoredRecord for BackupSnapshot {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_ts(&self) -> i64 {
        self.ts
    }
}

/// Keyed record collection capability shared by every store adapter.
///
/// Object-safe on purpose: the gateway holds collections as
/// `Box<dyn RecordCollection<T>>` so production stores and test fakes
/// are interchangeable.
pub trait RecordCollection<T: StoredRecord> {
    fn get(&self, id: &str) -> StoreResult<Option<T>>;
    fn put(&self, record: &T) -> StoreResult<()>;
    fn get_all(&self) -> StoreResult<Vec<T>>;
    fn delete(&self, id: &str) -> StoreResult<()>;
    fn clear(&self) -> StoreResult<()>;
}

/// Dedicated single-row store for the retention scheduler's guard
/// marker.
pub trait SchedulerStateStore {
    /// Loads the persisted state; absence reads as the default state.
    fn load(&self) -> StoreResult<SchedulerState>;
    fn save(&self, state: &SchedulerState) -> StoreResult<()>;
}
