//! Literal parameter binding.
//!
//! The wpdb-style backend only accepts fully-literal SQL text, so every
//! positional `?` placeholder has to be resolved to a safely quoted literal
//! before dispatch. This is the one place injection risk is concentrated;
//! everything that flows into a statement goes through [`render_literal`].

use crate::dialect::Dialect;
use crate::error::WpdbBridgeError;
use crate::types::SqlValue;

/// Render a SQL template with positional `?` placeholders into a
/// fully-literal statement.
///
/// ANSI double-quoted identifiers are rewritten to backticks first, then each
/// `?` is consumed, left to right, by the next binding's literal form:
/// ```rust
/// use wpdb_bridge::binder::bind_params;
/// use wpdb_bridge::{Dialect, SqlValue};
///
/// let sql = bind_params(
///     r#"select * from "users" where "login" = ? and "active" = ?"#,
///     &[SqlValue::Text("alice".into()), SqlValue::Bool(true)],
///     Dialect::MySql,
/// )?;
/// assert_eq!(sql, "select * from `users` where `login` = 'alice' and `active` = 1");
/// # Ok::<(), wpdb_bridge::WpdbBridgeError>(())
/// ```
///
/// With an empty binding list the quote-adapted template is returned as-is;
/// no placeholder or `%` processing happens at all.
///
/// # Errors
///
/// [`WpdbBridgeError::Binding`] when the template holds more placeholders
/// than bindings. Surplus bindings are ignored.
pub fn bind_params(
    template: &str,
    bindings: &[SqlValue],
    dialect: Dialect,
) -> Result<String, WpdbBridgeError> {
    let adapted = template.replace('"', "`");
    if bindings.is_empty() {
        return Ok(adapted);
    }

    let rendered: Vec<String> = prepare_bindings(bindings, dialect)
        .iter()
        .map(|value| render_literal(value, dialect))
        .collect();

    let mut out = String::with_capacity(adapted.len() + rendered.iter().map(String::len).sum::<usize>());
    let mut next = rendered.iter();
    // Single pass over the template: placeholder characters inside an
    // already-rendered binding are never re-substituted, and literal `%`
    // survives untouched.
    for ch in adapted.chars() {
        if ch == '?' {
            let Some(literal) = next.next() else {
                return Err(WpdbBridgeError::Binding(format!(
                    "template has more placeholders than bindings ({} supplied): {template}",
                    bindings.len()
                )));
            };
            out.push_str(literal);
        } else {
            out.push(ch);
        }
    }

    Ok(out)
}

/// Normalize bindings ahead of literal rendering: booleans collapse to
/// `0`/`1` integers and timestamps are formatted with the dialect's date
/// format. Everything else passes through unchanged.
#[must_use]
pub fn prepare_bindings(bindings: &[SqlValue], dialect: Dialect) -> Vec<SqlValue> {
    bindings
        .iter()
        .map(|value| match value {
            SqlValue::Bool(b) => SqlValue::Int(i64::from(*b)),
            SqlValue::Timestamp(dt) => {
                SqlValue::Text(dt.format(dialect.date_format()).to_string())
            }
            other => other.clone(),
        })
        .collect()
}

/// Literal form of a single binding.
///
/// Strings are escaped and single-quoted, `Null` becomes the bare token
/// `null`, numbers embed as-is, and [`SqlValue::Expression`] is trusted
/// verbatim.
#[must_use]
pub fn render_literal(value: &SqlValue, dialect: Dialect) -> String {
    match value {
        SqlValue::Text(s) => dialect.quote_string(s),
        SqlValue::Json(v) => dialect.quote_string(&v.to_string()),
        SqlValue::Null => "null".to_string(),
        SqlValue::Int(i) => i.to_string(),
        SqlValue::Float(f) => f.to_string(),
        // Normally rewritten by prepare_bindings; kept renderable for
        // direct callers.
        SqlValue::Bool(b) => i64::from(*b).to_string(),
        SqlValue::Timestamp(dt) => {
            dialect.quote_string(&dt.format(dialect.date_format()).to_string())
        }
        SqlValue::Blob(bytes) => {
            let mut hex = String::with_capacity(bytes.len() * 2 + 3);
            hex.push_str("X'");
            for b in bytes {
                hex.push_str(&format!("{b:02X}"));
            }
            hex.push('\'');
            hex
        }
        SqlValue::Expression(e) => e.clone(),
    }
}
