use serde::{Deserialize, Serialize};

/// SQL dialect spoken by the backend the rendered statements are handed to.
///
/// The bridge produces fully-literal SQL, so the dialect decides the three
/// things that differ between engines at that level: how string literals are
/// escaped, the date format for timestamp literals, and the statement that
/// opens a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// MySQL / MariaDB — what a wpdb-style handle speaks in production.
    #[default]
    MySql,
    /// `SQLite` — used by the bundled test backend.
    Sqlite,
}

impl Dialect {
    /// Format string for rendering [`crate::SqlValue::Timestamp`] bindings.
    #[must_use]
    pub fn date_format(self) -> &'static str {
        // Both supported engines accept the classic datetime literal shape.
        "%Y-%m-%d %H:%M:%S"
    }

    #[must_use]
    pub fn begin_statement(self) -> &'static str {
        match self {
            Dialect::MySql => "START TRANSACTION;",
            Dialect::Sqlite => "BEGIN TRANSACTION;",
        }
    }

    #[must_use]
    pub fn commit_statement(self) -> &'static str {
        "COMMIT;"
    }

    #[must_use]
    pub fn rollback_statement(self) -> &'static str {
        "ROLLBACK;"
    }

    /// Escape `raw` and wrap it in single quotes, producing a literal that is
    /// safe to embed in a statement for this dialect.
    #[must_use]
    pub fn quote_string(self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + 2);
        out.push('\'');
        match self {
            // mysql_real_escape_string's character set.
            Dialect::MySql => {
                for ch in raw.chars() {
                    match ch {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '"' => out.push_str("\\\""),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\0' => out.push_str("\\0"),
                        '\x1a' => out.push_str("\\Z"),
                        _ => out.push(ch),
                    }
                }
            }
            // SQLite has no escape character inside string literals; quotes
            // are doubled instead.
            Dialect::Sqlite => {
                for ch in raw.chars() {
                    if ch == '\'' {
                        out.push_str("''");
                    } else {
                        out.push(ch);
                    }
                }
            }
        }
        out.push('\'');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_escapes_quotes_and_backslashes() {
        assert_eq!(Dialect::MySql.quote_string("O'Reilly"), r"'O\'Reilly'");
        assert_eq!(Dialect::MySql.quote_string(r"a\b"), r"'a\\b'");
        assert_eq!(Dialect::MySql.quote_string("line\nbreak"), r"'line\nbreak'");
    }

    #[test]
    fn sqlite_doubles_single_quotes() {
        assert_eq!(Dialect::Sqlite.quote_string("O'Reilly"), "'O''Reilly'");
        assert_eq!(Dialect::Sqlite.quote_string(r"a\b"), r"'a\b'");
    }

    #[test]
    fn begin_statement_differs_per_dialect() {
        assert_eq!(Dialect::MySql.begin_statement(), "START TRANSACTION;");
        assert_eq!(Dialect::Sqlite.begin_statement(), "BEGIN TRANSACTION;");
    }
}
