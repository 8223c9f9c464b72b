//! Offline workout tracker persistence core.
//! This crate is the single source of truth for stored user data: the
//! dual-backed day-entry store, the diary, backup import/export and the
//! daily snapshot retention policy.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{BackupSnapshot, DayEntry, DiaryEntry, SchedulerState};
pub use service::backup::{
    BackupManager, DayEntriesPayload, DiaryPayload, ImportError, ImportMode, ImportStats,
    BACKUP_FILE_NAME,
};
pub use service::gateway::{PrimaryCollections, RecordGateway};
pub use service::retention::{RetentionScheduler, SnapshotOutcome, SNAPSHOT_RETENTION_LIMIT};
pub use service::startup::{open_core, CoreServices};
pub use store::{
    JsonFileCollection, JsonFileSchedulerState, MemoryCollection, RecordCollection,
    SchedulerStateStore, SqliteCollection, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
