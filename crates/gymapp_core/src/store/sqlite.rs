//! Primary-store collections backed by SQLite.
//!
//! # Responsibility
//! - Provide the transactional key-value collections of the primary
//!   store, one table per collection.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Table names come from the fixed constructors below and match the
//!   migration schema; they are never caller-supplied.
//! - Rows whose body fails to decode surface as `InvalidData` instead of
//!   being silently dropped.

use crate::model::{BackupSnapshot, DayEntry, DiaryEntry};
use crate::store::{RecordCollection, StoreError, StoreResult, StoredRecord};
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;
use std::rc::Rc;

/// One SQLite-backed record collection.
///
/// The connection is shared across collections with `Rc`: the core runs
/// on a single logical thread and the primary store is opened once per
/// process.
pub struct SqliteCollection<T> {
    conn: Rc<Connection>,
    table: &'static str,
    _marker: PhantomData<T>,
}

impl SqliteCollection<DayEntry> {
    pub fn day_entries(conn: Rc<Connection>) -> Self {
        Self::for_table(conn, "day_entries")
    }
}

impl SqliteCollection<DiaryEntry> {
    pub fn diary_entries(conn: Rc<Connection>) -> Self {
        Self::for_table(conn, "diary_entries")
    }
}

impl SqliteCollection<BackupSnapshot> {
    pub fn backup_snapshots(conn: Rc<Connection>) -> Self {
        Self::for_table(conn, "backup_snapshots")
    }
}

impl<T> SqliteCollection<T> {
    fn for_table(conn: Rc<Connection>, table: &'static str) -> Self {
        Self {
            conn,
            table,
            _marker: PhantomData,
        }
    }
}

impl<T: StoredRecord> RecordCollection<T> for SqliteCollection<T> {
    fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let body: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT body FROM {} WHERE id = ?1;", self.table),
                [id],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => Ok(Some(decode_body(self.table, id, &body)?)),
            None => Ok(None),
        }
    }

    fn put(&self, record: &T) -> StoreResult<()> {
        let body = serde_json::to_string(record)?;
        self.conn.execute(
            &format!(
                "INSERT INTO {} (id, ts, body) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET ts = excluded.ts, body = excluded.body;",
                self.table
            ),
            params![record.record_id(), record.record_ts(), body],
        )?;
        Ok(())
    }

    fn get_all(&self) -> StoreResult<Vec<T>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, body FROM {} ORDER BY ts DESC, id ASC;",
            self.table
        ))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let body: String = row.get(1)?;
            records.push(decode_body(self.table, &id, &body)?);
        }

        Ok(records)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", self.table),
            [id],
        )?;
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.conn
            .execute(&format!("DELETE FROM {};", self.table), [])?;
        Ok(())
    }
}

fn decode_body<T: StoredRecord>(table: &str, id: &str, body: &str) -> StoreResult<T> {
    serde_json::from_str(body).map_err(|err| {
        StoreError::InvalidData(format!("undecodable body for `{id}` in {table}: {err}"))
    })
}
