use std::collections::HashMap;

use crate::connection::Connection;
use crate::error::WpdbBridgeError;

/// Registry of named [`Connection`]s with a settable default.
///
/// Explicitly constructed and passed around — there is no hidden
/// process-wide accessor. Code that used to reach for a global handle asks
/// the resolver instead.
#[derive(Debug, Default)]
pub struct ConnectionResolver {
    connections: HashMap<String, Connection>,
    default: Option<String>,
}

impl ConnectionResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection under `name`. The first registered connection
    /// becomes the default until [`set_default_connection`] says otherwise.
    ///
    /// [`set_default_connection`]: ConnectionResolver::set_default_connection
    pub fn add_connection(&mut self, name: impl Into<String>, connection: Connection) {
        let name = name.into();
        if self.default.is_none() {
            self.default = Some(name.clone());
        }
        self.connections.insert(name, connection);
    }

    /// Look up a connection by name, or the default when `name` is `None`.
    ///
    /// # Errors
    ///
    /// [`WpdbBridgeError::Config`] when no default is set or the name is
    /// unknown.
    pub fn connection(&mut self, name: Option<&str>) -> Result<&mut Connection, WpdbBridgeError> {
        let name = match name {
            Some(n) => n.to_string(),
            None => self
                .default
                .clone()
                .ok_or_else(|| WpdbBridgeError::Config("no default connection set".to_string()))?,
        };
        self.connections
            .get_mut(&name)
            .ok_or_else(|| WpdbBridgeError::Config(format!("unknown connection `{name}`")))
    }

    pub fn set_default_connection(&mut self, name: impl Into<String>) {
        self.default = Some(name.into());
    }

    #[must_use]
    pub fn default_connection(&self) -> Option<&str> {
        self.default.as_deref()
    }
}
