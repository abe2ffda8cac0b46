#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use wpdb_bridge::prelude::*;

fn sqlite_conn() -> Result<Connection, WpdbBridgeError> {
    let backend = SqliteBackend::open_in_memory()?;
    let conn = Connection::with_config(
        Box::new(backend),
        ConnectionConfig {
            name: "sqlite-test".to_string(),
            dialect: Dialect::Sqlite,
        },
    );
    Ok(conn)
}

fn create_users_table(conn: &mut Connection) {
    let table = conn.prefixed_table("users");
    let ddl = format!(
        "CREATE TABLE {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            display_name TEXT,
            active INTEGER,
            deleted_at TEXT,
            registered TEXT
        )"
    );
    assert!(conn.unprepared(&ddl));
}

#[test]
fn parameterized_round_trip() -> Result<(), WpdbBridgeError> {
    let mut conn = sqlite_conn()?;
    create_users_table(&mut conn);

    let registered = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(14, 30, 5))
        .ok_or_else(|| WpdbBridgeError::Config("bad test date".to_string()))?;

    let inserted = conn.insert(
        r#"insert into "wp_users" ("display_name", "active", "deleted_at", "registered")
           values (?, ?, ?, ?)"#,
        &[
            SqlValue::Text("O'Reilly".into()),
            SqlValue::Bool(true),
            SqlValue::Null,
            SqlValue::Timestamp(registered),
        ],
    )?;
    assert!(inserted);
    assert_eq!(conn.last_insert_id(), 1);

    let row = conn
        .select_one(
            r#"select * from "wp_users" where "display_name" = ?"#,
            &[SqlValue::Text("O'Reilly".into())],
        )?
        .ok_or_else(|| WpdbBridgeError::Config("row not found".to_string()))?;

    assert_eq!(row.get("display_name"), Some(&SqlValue::Text("O'Reilly".into())));
    assert_eq!(row.get("active").and_then(|v| v.as_bool().copied()), Some(true));
    assert_eq!(row.get("deleted_at"), Some(&SqlValue::Null));
    assert_eq!(
        row.get("registered").and_then(SqlValue::as_timestamp),
        Some(registered),
    );
    Ok(())
}

#[test]
fn update_reports_affected_rows() -> Result<(), WpdbBridgeError> {
    let mut conn = sqlite_conn()?;
    create_users_table(&mut conn);

    for name in ["a", "b", "c"] {
        conn.insert(
            "insert into wp_users (display_name, active) values (?, ?)",
            &[SqlValue::Text(name.into()), SqlValue::Bool(true)],
        )?;
    }

    let affected = conn.update(
        "update wp_users set active = ? where display_name != ?",
        &[SqlValue::Bool(false), SqlValue::Text("c".into())],
    )?;
    assert_eq!(affected, 2);
    Ok(())
}

#[test]
fn select_on_missing_table_is_an_execution_error() -> Result<(), WpdbBridgeError> {
    let mut conn = sqlite_conn()?;

    let err = conn.select("select * from wp_ghost", &[]).unwrap_err();
    match err {
        WpdbBridgeError::Execution { connection, message, .. } => {
            assert_eq!(connection, "sqlite-test");
            assert!(message.contains("wp_ghost"));
        }
        other => panic!("expected execution error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn transaction_commit_path_persists_rows() -> Result<(), WpdbBridgeError> {
    let mut conn = sqlite_conn()?;
    create_users_table(&mut conn);

    conn.transaction(|conn| {
        conn.insert(
            "insert into wp_users (display_name) values (?)",
            &[SqlValue::Text("kept".into())],
        )?;
        Ok(())
    })?;

    assert_eq!(conn.transaction_level(), 0);
    let rows = conn.select("select * from wp_users", &[])?;
    assert_eq!(rows.len(), 1);
    Ok(())
}

#[test]
fn transaction_rollback_path_discards_rows() -> Result<(), WpdbBridgeError> {
    let mut conn = sqlite_conn()?;
    create_users_table(&mut conn);

    let result = conn.transaction::<(), _>(|conn| {
        conn.insert(
            "insert into wp_users (display_name) values (?)",
            &[SqlValue::Text("discarded".into())],
        )?;
        Err(WpdbBridgeError::Config("abort".to_string()))
    });
    assert!(result.is_err());

    let rows = conn.select("select * from wp_users", &[])?;
    assert!(rows.is_empty());

    // The counter stays desynchronized after rollback, and the stray commit
    // it implies fails against the backend (no transaction is open).
    assert_eq!(conn.transaction_level(), 1);
    assert!(!conn.commit());
    assert_eq!(conn.transaction_level(), 1);
    Ok(())
}

#[test]
fn file_backed_database_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bridge.db");

    {
        let backend = SqliteBackend::open(&path)?;
        let mut conn = Connection::with_config(
            Box::new(backend),
            ConnectionConfig {
                name: "file-test".to_string(),
                dialect: Dialect::Sqlite,
            },
        );
        conn.unprepared("CREATE TABLE wp_options (name TEXT, value TEXT)");
        conn.insert(
            "insert into wp_options (name, value) values (?, ?)",
            &[SqlValue::Text("siteurl".into()), SqlValue::Text("https://example.test".into())],
        )?;
    }

    let backend = SqliteBackend::open(&path)?;
    let mut conn = Connection::with_config(
        Box::new(backend),
        ConnectionConfig {
            name: "file-test".to_string(),
            dialect: Dialect::Sqlite,
        },
    );
    let row = conn
        .select_one("select value from wp_options where name = ?", &[SqlValue::Text("siteurl".into())])?
        .ok_or("row not found")?;
    assert_eq!(row.get("value"), Some(&SqlValue::Text("https://example.test".into())));
    Ok(())
}
