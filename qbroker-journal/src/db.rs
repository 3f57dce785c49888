//! The send/ack journal table.
//!
//! Both journals share one schema — `(message_id, queue_name,
//! message_data, pub_date)` — matching `send_msg`/`ack_msg` in the
//! original system's embedded store. Queries are the fixed set spec §6
//! names: `INSERT`, `DELETE ... WHERE message_id = ?`,
//! `DELETE ... WHERE queue_name = ?`, paginated
//! `SELECT ... ORDER BY pub_date ASC|DESC LIMIT ? OFFSET ?`, and
//! `SELECT COUNT(*)`.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::error::JournalError;

/// One journal row: a message awaiting delivery (send journal) or
/// acknowledgement (ack journal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRow {
    pub message_id: String,
    pub queue_name: String,
    pub message_data: String,
    pub pub_date: i64,
}

/// A single-table SQLite-backed journal. `rusqlite`'s bundled SQLite
/// serializes readers and writers internally, matching spec §5's
/// requirement for "an embedded relational store that serializes readers
/// and writers internally" without an additional application-level lock
/// beyond what guards the `Connection` handle itself.
pub struct Journal {
    conn: Mutex<Connection>,
    table: &'static str,
}

impl Journal {
    /// Opens (creating if absent) the journal file at `path`, using
    /// `table` as the SQL table name (`"send_msg"` or `"ack_msg"`).
    pub fn open(path: &Path, table: &'static str) -> Result<Self, JournalError> {
        let conn = Connection::open(path)?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    message_id TEXT PRIMARY KEY,
                    queue_name TEXT NOT NULL,
                    message_data TEXT NOT NULL,
                    pub_date INTEGER NOT NULL
                )"
            ),
            [],
        )?;
        conn.execute(
            &format!("CREATE INDEX IF NOT EXISTS idx_{table}_queue ON {table}(queue_name)"),
            [],
        )?;
        conn.execute(
            &format!("CREATE INDEX IF NOT EXISTS idx_{table}_pub_date ON {table}(pub_date)"),
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            table,
        })
    }

    /// Opens an in-memory journal, used by tests.
    pub fn open_in_memory(table: &'static str) -> Result<Self, JournalError> {
        let conn = Connection::open_in_memory()?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    message_id TEXT PRIMARY KEY,
                    queue_name TEXT NOT NULL,
                    message_data TEXT NOT NULL,
                    pub_date INTEGER NOT NULL
                )"
            ),
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            table,
        })
    }

    /// Inserts one row.
    pub fn insert(&self, row: &JournalRow) -> Result<(), JournalError> {
        let conn = self.conn.lock().unwrap_or_else(|poison| poison.into_inner());
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (message_id, queue_name, message_data, pub_date) \
                 VALUES (?1, ?2, ?3, ?4)",
                self.table
            ),
            params![row.message_id, row.queue_name, row.message_data, row.pub_date],
        )?;
        Ok(())
    }

    /// Deletes the row for one identifier. Not an error if absent.
    pub fn delete_by_id(&self, message_id: &str) -> Result<(), JournalError> {
        let conn = self.conn.lock().unwrap_or_else(|poison| poison.into_inner());
        conn.execute(
            &format!("DELETE FROM {} WHERE message_id = ?1", self.table),
            params![message_id],
        )?;
        Ok(())
    }

    /// Deletes every row for one queue.
    pub fn delete_by_queue(&self, queue_name: &str) -> Result<(), JournalError> {
        let conn = self.conn.lock().unwrap_or_else(|poison| poison.into_inner());
        conn.execute(
            &format!("DELETE FROM {} WHERE queue_name = ?1", self.table),
            params![queue_name],
        )?;
        Ok(())
    }

    /// One page of rows ordered by `pub_date` ascending, for replay.
    pub fn page(&self, offset: i64, limit: i64) -> Result<Vec<JournalRow>, JournalError> {
        let conn = self.conn.lock().unwrap_or_else(|poison| poison.into_inner());
        let mut stmt = conn.prepare(&format!(
            "SELECT message_id, queue_name, message_data, pub_date FROM {} \
             ORDER BY pub_date ASC LIMIT ?1 OFFSET ?2",
            self.table
        ))?;
        let rows = stmt
            .query_map(params![limit, offset], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Rows whose `pub_date` is strictly less than `cutoff`, newest
    /// first, batched for the redelivery sweep.
    pub fn older_than(&self, cutoff: i64, limit: i64) -> Result<Vec<JournalRow>, JournalError> {
        let conn = self.conn.lock().unwrap_or_else(|poison| poison.into_inner());
        let mut stmt = conn.prepare(&format!(
            "SELECT message_id, queue_name, message_data, pub_date FROM {} \
             WHERE pub_date < ?1 ORDER BY pub_date DESC LIMIT ?2",
            self.table
        ))?;
        let rows = stmt
            .query_map(params![cutoff, limit], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Total row count.
    pub fn count(&self) -> Result<i64, JournalError> {
        let conn = self.conn.lock().unwrap_or_else(|poison| poison.into_inner());
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<JournalRow> {
        Ok(JournalRow {
            message_id: row.get(0)?,
            queue_name: row.get(1)?,
            message_data: row.get(2)?,
            pub_date: row.get(3)?,
        })
    }
}
