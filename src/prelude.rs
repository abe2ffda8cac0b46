//! Convenient imports for common functionality.

pub use crate::backend::Backend;
pub use crate::binder::{bind_params, prepare_bindings};
pub use crate::connection::{Connection, ConnectionConfig};
pub use crate::dialect::Dialect;
pub use crate::error::WpdbBridgeError;
pub use crate::resolver::ConnectionResolver;
pub use crate::results::Row;
pub use crate::types::SqlValue;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteBackend;
