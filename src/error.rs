use thiserror::Error;

use crate::types::SqlValue;

#[derive(Debug, Error)]
pub enum WpdbBridgeError {
    /// The backend reported a failure (falsy result or a `last_error`
    /// string). Carries everything needed to reconstruct the failed call.
    #[error("query error on connection `{connection}`: {message} (sql: {sql})")]
    Execution {
        connection: String,
        sql: String,
        bindings: Vec<SqlValue>,
        message: String,
    },

    /// Placeholder/binding mismatch detected while rendering literal SQL.
    /// A caller bug, not a recoverable condition.
    #[error("parameter binding error: {0}")]
    Binding(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
