//! Per-exercise session record.
//!
//! # Responsibility
//! - Define the user-editable (weight, note) record attached to one
//!   exercise within one plan day.
//! - Derive the stable merge identity from plan position.
//!
//! # Invariants
//! - `id` is a pure function of `day_key` and `exercise`; two writes for
//!   the same plan cell always collide on the same id.
//! - `month`/`week_title`/`day_title` are informational only and never
//!   participate in identity.

use serde::{Deserialize, Serialize};

/// One user-editable record per (plan day, exercise) pair.
///
/// Serialized field names match the exported backup schema, so this
/// struct round-trips through backup files unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// Stable merge key, see [`DayEntry::derive_id`].
    #[serde(default)]
    pub id: String,
    /// Opaque plan-position key built by the presentation layer and
    /// passed through unchanged.
    #[serde(default)]
    pub day_key: String,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub week_title: String,
    #[serde(default)]
    pub day_title: String,
    #[serde(default)]
    pub exercise: String,
    /// Free-text weight used, e.g. "60kg x5".
    #[serde(default)]
    pub kg: String,
    #[serde(default)]
    pub note: String,
    /// Last-write time in epoch milliseconds.
    #[serde(default)]
    pub ts: i64,
}

impl DayEntry {
    /// Creates an entry for one plan cell with empty user fields and the
    /// current write timestamp.
    pub fn new(
        day_key: impl Into<String>,
        month: impl Into<String>,
        week_title: impl Into<String>,
        day_title: impl Into<String>,
        exercise: impl Into<String>,
    ) -> Self {
        let day_key = day_key.into();
        let exercise = exercise.into();
        Self {
            id: Self::derive_id(&day_key, &exercise),
            day_key,
            month: month.into(),
            week_title: week_title.into(),
            day_title: day_title.into(),
            exercise,
            kg: String::new(),
            note: String::new(),
            ts: super::now_epoch_ms(),
        }
    }

    /// Derives the stable record id for one plan cell.
    pub fn derive_id(day_key: &str, exercise: &str) -> String {
        format!("{day_key}::{exercise}")
    }

    /// Stamps the entry with the current write time.
    pub fn touch(&mut self) {
        self.ts = super::now_epoch_ms();
    }
}
