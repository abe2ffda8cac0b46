use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::binder::bind_params;
use crate::dialect::Dialect;
use crate::error::WpdbBridgeError;
use crate::results::Row;
use crate::transaction::TransactionDepth;
use crate::types::SqlValue;

/// Connection settings. The name is what execution errors report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub name: String,
    pub dialect: Dialect,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            dialect: Dialect::MySql,
        }
    }
}

/// A synchronous database connection that drives every statement through a
/// wpdb-style [`Backend`].
///
/// Each operation renders its SQL template and bindings to a fully-literal
/// statement via [`bind_params`] and dispatches it in a single blocking
/// call. The backend is injected at construction, so tests can substitute a
/// scripted double; a production connection is typically built once at
/// process start and lives as long as the process. `Connection` is not
/// `Sync`; it belongs to one logical thread of control.
pub struct Connection {
    backend: Box<dyn Backend>,
    config: ConnectionConfig,
    depth: TransactionDepth,
}

impl Connection {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self::with_config(backend, ConnectionConfig::default())
    }

    pub fn with_config(backend: Box<dyn Backend>, config: ConnectionConfig) -> Self {
        Self {
            backend,
            config,
            depth: TransactionDepth::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Table-name prefix of the underlying backend (e.g. `wp_`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.backend.prefix()
    }

    /// Namespace a table name with the backend's prefix.
    #[must_use]
    pub fn prefixed_table(&self, table: &str) -> String {
        format!("{}{}", self.backend.prefix(), table)
    }

    /// Build a raw SQL fragment that the binder will embed verbatim.
    #[must_use]
    pub fn raw(&self, fragment: impl Into<String>) -> SqlValue {
        SqlValue::expr(fragment)
    }

    /// Row id generated by the most recent successful insert.
    #[must_use]
    pub fn last_insert_id(&self) -> u64 {
        self.backend.insert_id()
    }

    fn bind(&self, query: &str, bindings: &[SqlValue]) -> Result<String, WpdbBridgeError> {
        bind_params(query, bindings, self.config.dialect)
    }

    fn execution_error(&self, sql: String, bindings: &[SqlValue]) -> WpdbBridgeError {
        let message = self
            .backend
            .last_error()
            .unwrap_or_else(|| "backend reported failure".to_string());
        WpdbBridgeError::Execution {
            connection: self.config.name.clone(),
            sql,
            bindings: bindings.to_vec(),
            message,
        }
    }

    /// Run a select statement and return the full result set.
    ///
    /// # Errors
    ///
    /// [`WpdbBridgeError::Execution`] when the backend reports an error,
    /// [`WpdbBridgeError::Binding`] on placeholder/binding mismatch.
    pub fn select(
        &mut self,
        query: &str,
        bindings: &[SqlValue],
    ) -> Result<Vec<Row>, WpdbBridgeError> {
        let sql = self.bind(query, bindings)?;
        debug!(connection = %self.config.name, sql = %sql, "select");
        let rows = self.backend.get_results(&sql);
        if self.backend.last_error().is_some() {
            return Err(self.execution_error(sql, bindings));
        }
        Ok(rows)
    }

    /// Run a select statement and return only the first row.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Connection::select`]; an empty result is
    /// `Ok(None)`, not an error.
    pub fn select_one(
        &mut self,
        query: &str,
        bindings: &[SqlValue],
    ) -> Result<Option<Row>, WpdbBridgeError> {
        let sql = self.bind(query, bindings)?;
        debug!(connection = %self.config.name, sql = %sql, "select_one");
        let row = self.backend.get_row(&sql);
        if self.backend.last_error().is_some() {
            return Err(self.execution_error(sql, bindings));
        }
        Ok(row)
    }

    /// Iterate over a result set. The backend has no streaming API, so the
    /// set is fetched eagerly and handed out row by row.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Connection::select`].
    pub fn cursor(
        &mut self,
        query: &str,
        bindings: &[SqlValue],
    ) -> Result<std::vec::IntoIter<Row>, WpdbBridgeError> {
        Ok(self.select(query, bindings)?.into_iter())
    }

    /// Run an insert statement. Delegates to [`Connection::statement`].
    ///
    /// # Errors
    ///
    /// [`WpdbBridgeError::Binding`] on placeholder/binding mismatch.
    pub fn insert(
        &mut self,
        query: &str,
        bindings: &[SqlValue],
    ) -> Result<bool, WpdbBridgeError> {
        self.statement(query, bindings)
    }

    /// Run an update statement and return the number of affected rows.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Connection::affecting_statement`].
    pub fn update(&mut self, query: &str, bindings: &[SqlValue]) -> Result<u64, WpdbBridgeError> {
        self.affecting_statement(query, bindings)
    }

    /// Run a delete statement and return the number of affected rows.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Connection::affecting_statement`].
    pub fn delete(&mut self, query: &str, bindings: &[SqlValue]) -> Result<u64, WpdbBridgeError> {
        self.affecting_statement(query, bindings)
    }

    /// Execute a statement and report backend success as a boolean.
    /// Execution failure is the `false` return, not an error.
    ///
    /// # Errors
    ///
    /// Only [`WpdbBridgeError::Binding`], from rendering the template.
    pub fn statement(
        &mut self,
        query: &str,
        bindings: &[SqlValue],
    ) -> Result<bool, WpdbBridgeError> {
        let sql = self.bind(query, bindings)?;
        Ok(self.unprepared(&sql))
    }

    /// Execute a statement and return the number of rows affected.
    ///
    /// # Errors
    ///
    /// [`WpdbBridgeError::Execution`] when the backend reports failure,
    /// [`WpdbBridgeError::Binding`] on placeholder/binding mismatch.
    pub fn affecting_statement(
        &mut self,
        query: &str,
        bindings: &[SqlValue],
    ) -> Result<u64, WpdbBridgeError> {
        let sql = self.bind(query, bindings)?;
        debug!(connection = %self.config.name, sql = %sql, "affecting_statement");
        match self.backend.query(&sql) {
            Some(affected) if self.backend.last_error().is_none() => Ok(affected),
            _ => Err(self.execution_error(sql, bindings)),
        }
    }

    /// Run a raw, already-literal statement. True when the backend accepted
    /// it and reported no error.
    pub fn unprepared(&mut self, sql: &str) -> bool {
        debug!(connection = %self.config.name, sql = %sql, "unprepared");
        let result = self.backend.query(sql);
        result.is_some() && self.backend.last_error().is_none()
    }

    /// Start a transaction; on success the depth counter grows by one.
    ///
    /// No savepoints: a nested call re-issues the start statement against
    /// the backend, with whatever consequences that engine attaches to it.
    pub fn begin_transaction(&mut self) -> bool {
        let statement = self.config.dialect.begin_statement();
        let started = self.unprepared(statement);
        if started {
            self.depth.increment();
        }
        started
    }

    /// Commit the innermost tracked transaction. A no-op at depth zero —
    /// nothing is sent to the backend and `false` is returned.
    pub fn commit(&mut self) -> bool {
        if !self.depth.is_active() {
            return false;
        }
        let statement = self.config.dialect.commit_statement();
        let committed = self.unprepared(statement);
        if committed {
            self.depth.decrement();
        }
        committed
    }

    /// Issue a rollback. The depth counter is not decremented here; callers
    /// that roll back mid-stack inherit a desynchronized counter until
    /// matching commits drain it.
    pub fn rollback(&mut self) -> bool {
        let statement = self.config.dialect.rollback_statement();
        self.unprepared(statement)
    }

    /// Current tracked transaction depth.
    #[must_use]
    pub fn transaction_level(&self) -> u32 {
        self.depth.get()
    }

    /// Execute a callback inside a transaction: begin, run, commit. Any
    /// error from the callback triggers an unconditional rollback and
    /// propagates unchanged.
    ///
    /// # Errors
    ///
    /// Whatever the callback returns, re-raised after the rollback.
    pub fn transaction<T, F>(&mut self, callback: F) -> Result<T, WpdbBridgeError>
    where
        F: FnOnce(&mut Self) -> Result<T, WpdbBridgeError>,
    {
        self.begin_transaction();
        match callback(self) {
            Ok(value) => {
                self.commit();
                Ok(value)
            }
            Err(err) => {
                warn!(connection = %self.config.name, "transaction callback failed, rolling back");
                self.rollback();
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("config", &self.config)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
