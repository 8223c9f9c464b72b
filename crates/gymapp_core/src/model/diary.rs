//! Freeform workout diary record.
//!
//! # Responsibility
//! - Define the append-only log line independent of the plan hierarchy.
//!
//! # Invariants
//! - `id` is random and never reused; the UI generates a fresh id per
//!   save, so entries are effectively immutable once written.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One freeform log line, e.g. "2026-08-06 Squat 60kg x5, RIR 2".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    /// Calendar date string, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub exercise: String,
    /// What was actually lifted, free text.
    #[serde(default)]
    pub actual: String,
    #[serde(default)]
    pub note: String,
    /// Write time in epoch milliseconds.
    #[serde(default)]
    pub ts: i64,
}

impl DiaryEntry {
    /// Creates a diary line with a fresh random id and the current
    /// write timestamp. `actual` and `note` are trimmed.
    pub fn new(
        date: impl Into<String>,
        exercise: impl Into<String>,
        actual: &str,
        note: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: date.into(),
            exercise: exercise.into(),
            actual: actual.trim().to_string(),
            note: note.trim().to_string(),
            ts: super::now_epoch_ms(),
        }
    }
}
