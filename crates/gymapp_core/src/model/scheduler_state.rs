//! Retention-scheduler guard state.
//!
//! # Responsibility
//! - Hold the single persisted marker that prevents more than one
//!   automatic snapshot per calendar day.
//!
//! # Invariants
//! - This is a dedicated single-row entity, not a key scattered among
//!   unrelated settings.

use serde::{Deserialize, Serialize};

/// Persisted scheduler state; one row per installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerState {
    /// Local day key (`YYYY-MM-DD`) of the last successful automatic
    /// snapshot, or `None` before the first run.
    #[serde(default)]
    pub last_auto_backup_date: Option<String>,
}

impl SchedulerState {
    /// Whether the automatic snapshot already ran for `day_key`.
    pub fn ran_on(&self, day_key: &str) -> bool {
        self.last_auto_backup_date.as_deref() == Some(day_key)
    }
}
