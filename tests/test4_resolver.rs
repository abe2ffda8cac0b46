use wpdb_bridge::prelude::*;
use wpdb_bridge::test_utils::MockBackend;

fn named_connection(name: &str) -> Connection {
    Connection::with_config(
        Box::new(MockBackend::new()),
        ConnectionConfig {
            name: name.to_string(),
            dialect: Dialect::MySql,
        },
    )
}

#[test]
fn first_registered_connection_becomes_default() -> Result<(), WpdbBridgeError> {
    let mut resolver = ConnectionResolver::new();
    resolver.add_connection("primary", named_connection("primary"));
    resolver.add_connection("reporting", named_connection("reporting"));

    assert_eq!(resolver.default_connection(), Some("primary"));
    assert_eq!(resolver.connection(None)?.name(), "primary");
    assert_eq!(resolver.connection(Some("reporting"))?.name(), "reporting");
    Ok(())
}

#[test]
fn default_can_be_reassigned() -> Result<(), WpdbBridgeError> {
    let mut resolver = ConnectionResolver::new();
    resolver.add_connection("primary", named_connection("primary"));
    resolver.add_connection("reporting", named_connection("reporting"));

    resolver.set_default_connection("reporting");
    assert_eq!(resolver.connection(None)?.name(), "reporting");
    Ok(())
}

#[test]
fn unknown_and_unset_lookups_are_config_errors() {
    let mut resolver = ConnectionResolver::new();

    let err = resolver.connection(None).unwrap_err();
    assert!(matches!(err, WpdbBridgeError::Config(_)));

    resolver.add_connection("primary", named_connection("primary"));
    let err = resolver.connection(Some("ghost")).unwrap_err();
    assert!(matches!(err, WpdbBridgeError::Config(message) if message.contains("ghost")));
}
