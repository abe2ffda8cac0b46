//! Test doubles for the [`Backend`] seam.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::backend::Backend;
use crate::results::Row;
use crate::types::SqlValue;

#[derive(Debug, Default)]
struct MockState {
    executed: Vec<String>,
    pending_results: VecDeque<Vec<Row>>,
    pending_failures: VecDeque<String>,
    last_error: Option<String>,
    rows_affected: u64,
    insert_id: u64,
}

/// Scripted, recording backend double.
///
/// Clones share state, so keep one handle for scripting/inspection and box
/// another into the [`crate::Connection`] under test:
/// ```rust
/// use wpdb_bridge::prelude::*;
/// use wpdb_bridge::test_utils::MockBackend;
///
/// let backend = MockBackend::new();
/// let mut conn = Connection::new(Box::new(backend.clone()));
/// conn.unprepared("SELECT 1");
/// assert_eq!(backend.executed(), ["SELECT 1"]);
/// ```
///
/// Every dispatched call appends its SQL to the log, clears `last_error`,
/// and consumes one scripted failure if any are queued.
#[derive(Debug, Clone)]
pub struct MockBackend {
    prefix: String,
    state: Rc<RefCell<MockState>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: "wp_".to_string(),
            state: Rc::default(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Every SQL string dispatched so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<String> {
        self.state.borrow().executed.clone()
    }

    /// Queue a result set for the next `get_results`/`get_row` call.
    pub fn queue_results(&self, rows: Vec<Row>) {
        self.state.borrow_mut().pending_results.push_back(rows);
    }

    /// Make the next dispatched call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state
            .borrow_mut()
            .pending_failures
            .push_back(message.into());
    }

    /// Affected-row count reported by successful `query` calls.
    pub fn set_rows_affected(&self, affected: u64) {
        self.state.borrow_mut().rows_affected = affected;
    }

    pub fn set_insert_id(&self, id: u64) {
        self.state.borrow_mut().insert_id = id;
    }

    fn dispatch(&self, sql: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.executed.push(sql.to_string());
        state.last_error = state.pending_failures.pop_front();
        state.last_error.is_none()
    }
}

impl Backend for MockBackend {
    fn query(&mut self, sql: &str) -> Option<u64> {
        if self.dispatch(sql) {
            Some(self.state.borrow().rows_affected)
        } else {
            None
        }
    }

    fn get_row(&mut self, sql: &str) -> Option<Row> {
        if self.dispatch(sql) {
            let mut state = self.state.borrow_mut();
            state
                .pending_results
                .pop_front()
                .and_then(|rows| rows.into_iter().next())
        } else {
            None
        }
    }

    fn get_results(&mut self, sql: &str) -> Vec<Row> {
        if self.dispatch(sql) {
            self.state
                .borrow_mut()
                .pending_results
                .pop_front()
                .unwrap_or_default()
        } else {
            Vec::new()
        }
    }

    fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    fn insert_id(&self) -> u64 {
        self.state.borrow().insert_id
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Build a [`Row`] from parallel column/value lists.
#[must_use]
pub fn row(columns: &[&str], values: Vec<SqlValue>) -> Row {
    Row::new(
        Arc::new(columns.iter().map(|c| (*c).to_string()).collect()),
        values,
    )
}
