//! Dual-store record gateway.
//!
//! # Responsibility
//! - Be the single persistence façade for the presentation layer: fan
//!   day-entry writes out to both stores, fan reads in from the primary
//!   with mirror fallback.
//! - Apply the swallow-and-log policy: store failures on user-facing
//!   paths never propagate past this boundary.
//!
//! # Invariants
//! - Day-entry writes hit the mirror before the primary, so every write
//!   is durable even when the primary store never opened.
//! - `all_day_entries` returns at most one record per id; on collision
//!   the primary copy wins regardless of `ts`.
//! - Diary and snapshot collections live on the primary only; with no
//!   primary they degrade to empty reads and dropped writes.

use crate::model::{BackupSnapshot, DayEntry, DiaryEntry};
use crate::store::{RecordCollection, SqliteCollection, StoreError, StoreResult};
use log::warn;
use rusqlite::Connection;
use std::collections::HashSet;
use std::rc::Rc;

/// The primary store's record collections, grouped so the gateway can
/// take "no primary at all" as a single `None`.
pub struct PrimaryCollections {
    pub day_entries: Box<dyn RecordCollection<DayEntry>>,
    pub diary_entries: Box<dyn RecordCollection<DiaryEntry>>,
    pub snapshots: Box<dyn RecordCollection<BackupSnapshot>>,
}

impl PrimaryCollections {
    /// Production wiring: all three collections on one SQLite
    /// connection.
    pub fn sqlite(conn: Rc<Connection>) -> Self {
        Self {
            day_entries: Box::new(SqliteCollection::day_entries(conn.clone())),
            diary_entries: Box::new(SqliteCollection::diary_entries(conn.clone())),
            snapshots: Box::new(SqliteCollection::backup_snapshots(conn)),
        }
    }
}

/// Persistence façade over the primary store and the day-entry mirror.
pub struct RecordGateway {
    primary: Option<PrimaryCollections>,
    mirror_days: Box<dyn RecordCollection<DayEntry>>,
}

impl RecordGateway {
    /// Creates a gateway from injected collections. `primary` is `None`
    /// when the primary store failed to open; the gateway then serves
    /// day entries from the mirror alone.
    pub fn new(
        primary: Option<PrimaryCollections>,
        mirror_days: Box<dyn RecordCollection<DayEntry>>,
    ) -> Self {
        if primary.is_none() {
            warn!("event=gateway_init module=gateway status=degraded primary=unavailable");
        }
        Self {
            primary,
            mirror_days,
        }
    }

    /// Whether the primary store is attached.
    pub fn primary_available(&self) -> bool {
        self.primary.is_some()
    }

    /// Writes one day entry to both stores. Mirror first: once that
    /// write lands the record is durable, and a primary failure only
    /// costs us the faster read path.
    pub fn write_day_entry(&self, entry: &DayEntry) {
        if let Err(err) = self.mirror_days.put(entry) {
            warn!(
                "event=gateway_write module=gateway status=degraded side=mirror id={} error={}",
                entry.id, err
            );
        }

        if let Some(primary) = &self.primary {
            if let Err(err) = primary.day_entries.put(entry) {
                warn!(
                    "event=gateway_write module=gateway status=degraded side=primary id={} error={}",
                    entry.id, err
                );
            }
        }
    }

    /// Reads one day entry, primary first. Falls back to the mirror
    /// when the primary is absent, errors, or has no such record (a
    /// read racing ahead of a primary write still sees the mirror copy).
    pub fn day_entry(&self, id: &str) -> Option<DayEntry> {
        if let Some(primary) = &self.primary {
            match primary.day_entries.get(id) {
                Ok(Some(entry)) => return Some(entry),
                Ok(None) => {}
                Err(err) => warn!(
                    "event=gateway_read module=gateway status=degraded side=primary id={id} error={err}"
                ),
            }
        }

        match self.mirror_days.get(id) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    "event=gateway_read module=gateway status=degraded side=mirror id={id} error={err}"
                );
                None
            }
        }
    }

    /// Returns the union of both stores' day entries, de-duplicated by
    /// id with the primary copy winning on collision.
    pub fn all_day_entries(&self) -> Vec<DayEntry> {
        let mut merged = match &self.primary {
            Some(primary) => match primary.day_entries.get_all() {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        "event=gateway_read_all module=gateway status=degraded side=primary error={err}"
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let primary_ids: HashSet<String> =
            merged.iter().map(|entry| entry.id.clone()).collect();

        match self.mirror_days.get_all() {
            Ok(entries) => {
                merged.extend(
                    entries
                        .into_iter()
                        .filter(|entry| !primary_ids.contains(&entry.id)),
                );
            }
            Err(err) => warn!(
                "event=gateway_read_all module=gateway status=degraded side=mirror error={err}"
            ),
        }

        merged
    }

    /// Clears the day-entry collection in both stores, mirror first.
    pub fn clear_day_entries(&self) {
        if let Err(err) = self.mirror_days.clear() {
            warn!(
                "event=gateway_clear module=gateway status=degraded side=mirror error={err}"
            );
        }

        if let Some(primary) = &self.primary {
            if let Err(err) = primary.day_entries.clear() {
                warn!(
                    "event=gateway_clear module=gateway status=degraded side=primary error={err}"
                );
            }
        }
    }

    /// Appends one diary entry. Best-effort: without a primary store the
    /// entry is dropped (and logged), matching the degraded mode the
    /// rest of the diary surface runs in.
    pub fn add_diary_entry(&self, entry: &DiaryEntry) {
        match &self.primary {
            Some(primary) => {
                if let Err(err) = primary.diary_entries.put(entry) {
                    warn!(
                        "event=diary_write module=gateway status=degraded id={} error={}",
                        entry.id, err
                    );
                }
            }
            None => warn!(
                "event=diary_write module=gateway status=dropped id={} primary=unavailable",
                entry.id
            ),
        }
    }

    /// Returns all diary entries, most recent first.
    pub fn all_diary_entries(&self) -> Vec<DiaryEntry> {
        let mut entries = match &self.primary {
            Some(primary) => match primary.diary_entries.get_all() {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("event=diary_read module=gateway status=degraded error={err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        entries.sort_by(|a, b| b.ts.cmp(&a.ts).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    /// Deletes all diary entries (the "reset my logs" action).
    pub fn clear_diary(&self) {
        if let Some(primary) = &self.primary {
            if let Err(err) = primary.diary_entries.clear() {
                warn!("event=diary_clear module=gateway status=degraded error={err}");
            }
        }
    }

    /// Persists a backup snapshot. Unlike the user-facing paths this
    /// reports failure: the retention scheduler must know the snapshot
    /// did not land so it can retry on the next process start.
    pub fn put_snapshot(&self, snapshot: &BackupSnapshot) -> StoreResult<()> {
        match &self.primary {
            Some(primary) => primary.snapshots.put(snapshot),
            None => Err(StoreError::Unavailable),
        }
    }

    /// Returns all stored snapshots, unordered.
    pub fn all_snapshots(&self) -> Vec<BackupSnapshot> {
        match &self.primary {
            Some(primary) => match primary.snapshots.get_all() {
                Ok(snapshots) => snapshots,
                Err(err) => {
                    warn!("event=snapshot_read module=gateway status=degraded error={err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// Deletes one snapshot by id. Pruning is best-effort; a failed
    /// delete is retried implicitly on the next retention pass.
    pub fn delete_snapshot(&self, id: &str) {
        if let Some(primary) = &self.primary {
            if let Err(err) = primary.snapshots.delete(id) {
                warn!(
                    "event=snapshot_delete module=gateway status=degraded id={id} error={err}"
                );
            }
        }
    }
}
