//! Domain records owned by the persistence core.
//!
//! # Responsibility
//! - Define the canonical shapes for day entries, diary entries and
//!   backup snapshots.
//! - Keep wire naming (camelCase) compatible with exported backup files.
//!
//! # Invariants
//! - Every record is identified by a stable string `id`.
//! - Day-entry ids are derived deterministically from plan position;
//!   diary and snapshot ids are random.

pub mod day_entry;
pub mod diary;
pub mod scheduler_state;
pub mod snapshot;

pub use day_entry::DayEntry;
pub use diary::DiaryEntry;
pub use scheduler_state::SchedulerState;
pub use snapshot::BackupSnapshot;

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current instant as an ISO-8601 / RFC 3339 string, for `exportedAt`
/// payload fields.
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Local calendar day key, `YYYY-MM-DD`.
///
/// Local time on purpose: "one snapshot per day" means one per day as
/// the user experiences it, not per UTC day.
pub fn today_key() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
