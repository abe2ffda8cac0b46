use crate::results::Row;

/// The capability surface of a wpdb-style database handle.
///
/// This is the exact duck-typed interface the host CMS exposes, made
/// explicit: string-SQL execution only (no prepared statements), an error
/// channel that is a string inspected after each call, a running insert-id
/// counter, and a table-name prefix used for namespacing.
///
/// Failure is signalled two ways, and callers must check both: a falsy
/// return (`None` from [`Backend::query`]) and a non-empty
/// [`Backend::last_error`]. Implementations clear `last_error` at the start
/// of every call, matching wpdb's per-query flush.
pub trait Backend {
    /// Execute an arbitrary SQL statement. Returns the affected-row count on
    /// success, `None` on failure.
    fn query(&mut self, sql: &str) -> Option<u64>;

    /// Fetch the first row of a result set, if any.
    fn get_row(&mut self, sql: &str) -> Option<Row>;

    /// Fetch a whole result set. An empty vec is both "no rows" and
    /// "failed"; [`Backend::last_error`] disambiguates.
    fn get_results(&mut self, sql: &str) -> Vec<Row>;

    /// Error message from the most recent call, if it failed.
    fn last_error(&self) -> Option<String>;

    /// Row id generated by the most recent successful insert.
    fn insert_id(&self) -> u64;

    /// Table-name prefix (e.g. `wp_`).
    fn prefix(&self) -> &str;
}
