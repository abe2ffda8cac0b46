//! Synchronous bridge that runs query-builder SQL through a wpdb-style
//! database handle.
//!
//! The handle this crate targets exposes only string-SQL execution — no
//! prepared statements, no parameter API — so every statement is rendered to
//! a fully-literal SQL string before dispatch. The two pieces that make that
//! safe and predictable live here:
//!
//! - [`binder::bind_params`]: positional `?` placeholders plus an ordered
//!   binding list become escaped, quoted literals.
//! - a flat transaction depth counter on [`Connection`], approximating
//!   nesting over a backend that has none.
//!
//! The backend itself is an injected [`Backend`] trait object; a scripted
//! double ships in [`test_utils`] and a real `SQLite`-backed one in
//! [`sqlite`] (feature `sqlite`, on by default).
//!
//! ```rust
//! use wpdb_bridge::prelude::*;
//! use wpdb_bridge::test_utils::MockBackend;
//!
//! let backend = MockBackend::new();
//! let mut conn = Connection::new(Box::new(backend.clone()));
//!
//! let users = conn.prefixed_table("users");
//! conn.insert(
//!     &format!(r#"insert into "{users}" ("user_login") values (?)"#),
//!     &[SqlValue::Text("alice".into())],
//! )?;
//!
//! assert_eq!(
//!     backend.executed(),
//!     ["insert into `wp_users` (`user_login`) values ('alice')"],
//! );
//! # Ok::<(), wpdb_bridge::WpdbBridgeError>(())
//! ```

pub mod backend;
pub mod binder;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod prelude;
pub mod resolver;
pub mod results;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod test_utils;
pub mod transaction;
pub mod types;

pub use backend::Backend;
pub use connection::{Connection, ConnectionConfig};
pub use dialect::Dialect;
pub use error::WpdbBridgeError;
pub use resolver::ConnectionResolver;
pub use results::Row;
pub use transaction::TransactionDepth;
pub use types::SqlValue;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBackend;
