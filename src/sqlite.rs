//! `SQLite`-backed [`Backend`] implementation.
//!
//! Lets the whole bridge be exercised against a real SQL engine. Statements
//! arrive fully literal (the binder has already run), so execution is plain
//! string SQL — the same contract the production wpdb handle offers.

use std::path::Path;
use std::sync::Arc;

use rusqlite::types::ValueRef;

use crate::backend::Backend;
use crate::error::WpdbBridgeError;
use crate::results::Row;
use crate::types::SqlValue;

/// wpdb-shaped wrapper around a `rusqlite` connection.
///
/// Mirrors the handle's error lifecycle: `last_error` is cleared at the
/// start of every call and set from the driver error on failure, and
/// `insert_id` tracks the last successful statement's generated rowid.
pub struct SqliteBackend {
    conn: rusqlite::Connection,
    prefix: String,
    last_error: Option<String>,
    insert_id: u64,
}

impl SqliteBackend {
    /// Open a file-backed database.
    ///
    /// # Errors
    ///
    /// Propagates the `rusqlite` open error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WpdbBridgeError> {
        Ok(Self::from_connection(rusqlite::Connection::open(path)?))
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    ///
    /// Propagates the `rusqlite` open error.
    pub fn open_in_memory() -> Result<Self, WpdbBridgeError> {
        Ok(Self::from_connection(rusqlite::Connection::open_in_memory()?))
    }

    #[must_use]
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self {
            conn,
            prefix: "wp_".to_string(),
            last_error: None,
            insert_id: 0,
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn run<T>(&mut self, op: impl FnOnce(&rusqlite::Connection) -> rusqlite::Result<T>) -> Option<T> {
        self.last_error = None;
        match op(&self.conn) {
            Ok(value) => Some(value),
            Err(err) => {
                self.last_error = Some(err.to_string());
                None
            }
        }
    }
}

impl Backend for SqliteBackend {
    fn query(&mut self, sql: &str) -> Option<u64> {
        let changes = self.run(|conn| {
            conn.execute_batch(sql)?;
            Ok(conn.changes())
        })?;
        self.insert_id = u64::try_from(self.conn.last_insert_rowid()).unwrap_or(0);
        Some(changes)
    }

    fn get_row(&mut self, sql: &str) -> Option<Row> {
        self.run(|conn| fetch_rows(conn, sql))
            .and_then(|rows| rows.into_iter().next())
    }

    fn get_results(&mut self, sql: &str) -> Vec<Row> {
        self.run(|conn| fetch_rows(conn, sql)).unwrap_or_default()
    }

    fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    fn insert_id(&self) -> u64 {
        self.insert_id
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }
}

fn fetch_rows(conn: &rusqlite::Connection, sql: &str) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Arc<Vec<String>> = Arc::new(
        stmt.column_names().iter().map(|s| (*s).to_string()).collect(),
    );

    let mut rows_iter = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            values.push(extract_value(row, i)?);
        }
        out.push(Row::new(columns.clone(), values));
    }
    Ok(out)
}

fn extract_value(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<SqlValue> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(i) => SqlValue::Int(i),
        ValueRef::Real(f) => SqlValue::Float(f),
        ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> SqliteBackend {
        let mut b = SqliteBackend::open_in_memory().unwrap();
        assert!(
            b.query("CREATE TABLE wp_t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)")
                .is_some()
        );
        b
    }

    #[test]
    fn failed_statement_sets_last_error() {
        let mut b = backend();
        assert!(b.query("NOT VALID SQL").is_none());
        assert!(b.last_error().is_some());

        // Next successful call clears it.
        assert!(b.query("INSERT INTO wp_t (name) VALUES ('a')").is_some());
        assert!(b.last_error().is_none());
    }

    #[test]
    fn insert_id_tracks_generated_rowids() {
        let mut b = backend();
        b.query("INSERT INTO wp_t (name) VALUES ('a')");
        assert_eq!(b.insert_id(), 1);
        b.query("INSERT INTO wp_t (name) VALUES ('b')");
        assert_eq!(b.insert_id(), 2);
    }

    #[test]
    fn get_row_returns_first_row_only() {
        let mut b = backend();
        b.query("INSERT INTO wp_t (name) VALUES ('a'), ('b')");
        let row = b.get_row("SELECT name FROM wp_t ORDER BY id").unwrap();
        assert_eq!(row.get("name"), Some(&SqlValue::Text("a".into())));
        assert_eq!(b.get_results("SELECT * FROM wp_t").len(), 2);
    }

    #[test]
    fn default_prefix_is_wp() {
        let b = SqliteBackend::open_in_memory().unwrap();
        assert_eq!(b.prefix(), "wp_");
        let b = b.with_prefix("app_");
        assert_eq!(b.prefix(), "app_");
    }
}
