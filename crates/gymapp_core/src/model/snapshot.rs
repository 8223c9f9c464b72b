//! Automatic daily diary snapshot.
//!
//! # Responsibility
//! - Define the point-in-time copy of all diary entries captured once
//!   per calendar day.
//!
//! # Invariants
//! - `date` is the local calendar day the snapshot was taken for; the
//!   scheduler intends one snapshot per `date`, but the store may hold
//!   duplicates transiently if capture runs twice before the guard
//!   marker is persisted.
//! - Retention is decided by `ts`, oldest first.

use crate::model::diary::DiaryEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rolling-window copy of the diary, created by the retention scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub id: String,
    /// Local calendar day key, `YYYY-MM-DD`.
    pub date: String,
    /// Capture time in epoch milliseconds.
    pub ts: i64,
    /// Capture time as ISO-8601, mirroring manual export payloads.
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
    /// Diary contents as of capture time.
    #[serde(default)]
    pub logs: Vec<DiaryEntry>,
}

impl BackupSnapshot {
    /// Captures a snapshot of `logs` for the given calendar day.
    pub fn capture(date: impl Into<String>, logs: Vec<DiaryEntry>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: date.into(),
            ts: super::now_epoch_ms(),
            exported_at: super::now_iso8601(),
            logs,
        }
    }
}
