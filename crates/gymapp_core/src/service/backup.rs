//! Backup export, parsing and import.
//!
//! # Responsibility
//! - Build portable JSON payloads from stored records.
//! - Parse and validate imported payloads, then apply them through the
//!   gateway in merge or replace mode.
//!
//! # Invariants
//! - `parse_payload` never touches any store; a rejected file leaves
//!   everything exactly as it was.
//! - Import tolerates malformed individual records by normalizing their
//!   fields; only a missing or non-array `dayEntries` aborts the import.
//! - Added/updated classification is decided against the id set
//!   snapshotted at the start of the import call.

use crate::model::{now_iso8601, DayEntry, DiaryEntry};
use crate::service::gateway::RecordGateway;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Suggested file name for downloaded backups.
pub const BACKUP_FILE_NAME: &str = "gymapp_offline_backup.json";

/// Payload version for day-entry backups. Version 1 is the diary-only
/// format (`logs` key) and is export-only; import accepts version 2.
pub const DAY_ENTRIES_PAYLOAD_VERSION: u32 = 2;
pub const DIARY_PAYLOAD_VERSION: u32 = 1;

/// Prefix for ids synthesized during import. Random, so a synthesized
/// id can never collide with a derived day-entry id.
const IMPORTED_ID_PREFIX: &str = "imported-";

/// Version-2 backup payload holding day entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntriesPayload {
    pub version: u32,
    pub exported_at: String,
    pub day_entries: Vec<DayEntry>,
}

/// Version-1 backup payload holding diary entries. Produced by the
/// separate diary export path; not accepted by [`BackupManager::import`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryPayload {
    pub version: u32,
    pub exported_at: String,
    pub logs: Vec<DiaryEntry>,
}

/// Import strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Add/update by identity; unrelated existing records survive.
    Merge,
    /// Clear the day-entry collection first, then apply the payload.
    Replace,
}

/// Counters reported back to the user after a successful import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub added: usize,
    pub updated: usize,
    /// Records present in the payload, valid or not.
    pub total: usize,
}

/// User-visible import failure. This is the one error class that
/// escapes the persistence layer: a malformed backup file must block
/// the operation with a message naming the problem.
#[derive(Debug)]
pub enum ImportError {
    /// The bytes are not well-formed JSON.
    InvalidFormat(String),
    /// The JSON parses but lacks a `dayEntries` array.
    SchemaError(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(reason) => write!(f, "file is not valid JSON: {reason}"),
            Self::SchemaError(reason) => write!(f, "{reason}"),
        }
    }
}

impl Error for ImportError {}

/// Backup use-case service over the record gateway.
pub struct BackupManager<'a> {
    gateway: &'a RecordGateway,
}

impl<'a> BackupManager<'a> {
    pub fn new(gateway: &'a RecordGateway) -> Self {
        Self { gateway }
    }

    /// Snapshots the merged day-entry view into a version-2 payload.
    pub fn export_day_entries(&self) -> DayEntriesPayload {
        DayEntriesPayload {
            version: DAY_ENTRIES_PAYLOAD_VERSION,
            exported_at: now_iso8601(),
            day_entries: self.gateway.all_day_entries(),
        }
    }

    /// Snapshots the diary into the version-1 `logs` payload.
    pub fn export_diary(&self) -> DiaryPayload {
        DiaryPayload {
            version: DIARY_PAYLOAD_VERSION,
            exported_at: now_iso8601(),
            logs: self.gateway.all_diary_entries(),
        }
    }

    /// Parses raw backup-file bytes into a day-entries payload.
    ///
    /// Two-stage validation: bytes must be JSON (`InvalidFormat`), and
    /// the document must carry `dayEntries` as an array (`SchemaError`).
    /// Individual records are normalized leniently, see
    /// [`day_entry_from_value`].
    pub fn parse_payload(raw: &[u8]) -> Result<DayEntriesPayload, ImportError> {
        let document: Value = serde_json::from_slice(raw)
            .map_err(|err| ImportError::InvalidFormat(err.to_string()))?;

        let entries = document
            .get("dayEntries")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ImportError::SchemaError("backup missing `dayEntries` list".to_string())
            })?;

        Ok(DayEntriesPayload {
            version: document.get("version").and_then(Value::as_u64).unwrap_or(0) as u32,
            exported_at: document
                .get("exportedAt")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            day_entries: entries.iter().map(day_entry_from_value).collect(),
        })
    }

    /// Applies a parsed payload through the gateway.
    ///
    /// Records without an id get a fresh `imported-` id and always count
    /// as added. Every record in the payload is persisted; `total`
    /// counts them all.
    pub fn import(&self, payload: &DayEntriesPayload, mode: ImportMode) -> ImportStats {
        let existing: HashSet<String> = self
            .gateway
            .all_day_entries()
            .into_iter()
            .map(|entry| entry.id)
            .collect();

        if mode == ImportMode::Replace {
            self.gateway.clear_day_entries();
        }

        let mut stats = ImportStats {
            total: payload.day_entries.len(),
            ..ImportStats::default()
        };

        for incoming in &payload.day_entries {
            let mut entry = incoming.clone();
            if entry.id.is_empty() {
                entry.id = format!("{IMPORTED_ID_PREFIX}{}", Uuid::new_v4());
                stats.added += 1;
            } else if existing.contains(&entry.id) {
                stats.updated += 1;
            } else {
                stats.added += 1;
            }

            self.gateway.write_day_entry(&entry);
        }

        info!(
            "event=import module=backup status=ok mode={:?} added={} updated={} total={}",
            mode, stats.added, stats.updated, stats.total
        );

        stats
    }
}

/// Normalizes one raw payload element into a day entry.
///
/// Missing or mistyped fields collapse to empty strings (`ts` to 0); a
/// record that is not even an object becomes an all-empty entry whose id
/// will be synthesized by the import pass.
fn day_entry_from_value(value: &Value) -> DayEntry {
    let text = |key: &str| -> String {
        value
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    DayEntry {
        id: text("id"),
        day_key: text("dayKey"),
        month: text("month"),
        week_title: text("weekTitle"),
        day_title: text("dayTitle"),
        exercise: text("exercise"),
        kg: text("kg"),
        note: text("note"),
        ts: value.get("ts").and_then(Value::as_i64).unwrap_or(0),
    }
}
