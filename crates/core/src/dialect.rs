//! Target database engines and the portable-script rewrite for each.
//!
//! The declaration script in `db/schema.sql` is written once in a portable
//! PostgreSQL-flavoured subset. [`adapt`] ports it to the engine selected at
//! runtime. The rewrite is purely textual: it never fails, and anything it
//! does not recognise passes through untouched.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Dialect
// ---------------------------------------------------------------------------

/// A supported relational engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Infer the dialect from a connection URL scheme
    /// (`postgres://`, `postgresql://`, `sqlite:`).
    pub fn from_url(url: &str) -> Result<Self, CoreError> {
        let scheme = url.split(':').next().unwrap_or_default();
        scheme.parse()
    }

    /// Map a sqlx backend name (`AnyConnection::backend_name`) to a dialect.
    pub fn from_backend_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "PostgreSQL" => Ok(Dialect::Postgres),
            "SQLite" => Ok(Dialect::Sqlite),
            other => Err(CoreError::UnsupportedDialect(other.to_string())),
        }
    }

    /// Bind placeholder for a UUID primary or foreign key parameter.
    ///
    /// Identifiers are bound as text; PostgreSQL needs an explicit cast into
    /// its native `UUID` column type.
    pub fn id_placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("CAST(${index} AS UUID)"),
            Dialect::Sqlite => format!("${index}"),
        }
    }

    /// Query counting tables named `$1` in the current schema.
    ///
    /// Used to detect the schema marker table before bootstrapping.
    pub fn table_exists_query(self) -> &'static str {
        match self {
            Dialect::Postgres => {
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = current_schema() AND table_name = $1"
            }
            Dialect::Sqlite => "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            other => Err(CoreError::UnsupportedDialect(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Rewrite rules
// ---------------------------------------------------------------------------

/// Portable unique-identifier type. SQLite has no UUID storage class.
static UUID_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUUID\b").expect("valid regex"));

/// Portable "current date/time" expression.
static NOW_FN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bNOW\s*\(\s*\)").expect("valid regex"));

static TIMESTAMPTZ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bTIMESTAMPTZ\b").expect("valid regex"));

/// Statements that only make sense when the script is fed to an interactive
/// client: database creation/selection and psql meta-commands.
static ADMIN_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(CREATE\s+DATABASE\b|DROP\s+DATABASE\b|USE\s+\S+|\\c(onnect)?\b)")
        .expect("valid regex")
});

/// Port a portable declaration script to `dialect`.
pub fn adapt(script: &str, dialect: Dialect) -> String {
    let stripped = strip_admin_lines(script);

    match dialect {
        Dialect::Postgres => stripped,
        Dialect::Sqlite => {
            let out = UUID_TYPE_RE.replace_all(&stripped, "TEXT");
            let out = NOW_FN_RE.replace_all(&out, "CURRENT_TIMESTAMP");
            TIMESTAMPTZ_RE.replace_all(&out, "TIMESTAMP").into_owned()
        }
    }
}

/// Whether a single script line is an administrative statement.
pub fn is_admin_line(line: &str) -> bool {
    ADMIN_LINE_RE.is_match(line)
}

fn strip_admin_lines(script: &str) -> String {
    let mut out = String::with_capacity(script.len());
    for line in script.split_inclusive('\n') {
        if !is_admin_line(line) {
            out.push_str(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- parsing --

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("Postgres".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("postgresql".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!(" SQLite ".parse::<Dialect>().unwrap(), Dialect::Sqlite);
    }

    #[test]
    fn rejects_unknown_dialect() {
        let err = "oracle".parse::<Dialect>().unwrap_err();
        assert_matches!(err, CoreError::UnsupportedDialect(ref name) if name == "oracle");
    }

    #[test]
    fn infers_dialect_from_url() {
        assert_eq!(
            Dialect::from_url("postgres://u:p@localhost/muac").unwrap(),
            Dialect::Postgres
        );
        assert_eq!(Dialect::from_url("sqlite://muac.db?mode=rwc").unwrap(), Dialect::Sqlite);
        assert_eq!(Dialect::from_url("sqlite::memory:").unwrap(), Dialect::Sqlite);
        assert!(Dialect::from_url("mysql://localhost/muac").is_err());
    }

    #[test]
    fn maps_backend_names() {
        assert_eq!(Dialect::from_backend_name("SQLite").unwrap(), Dialect::Sqlite);
        assert_eq!(
            Dialect::from_backend_name("PostgreSQL").unwrap(),
            Dialect::Postgres
        );
        assert!(Dialect::from_backend_name("MySQL").is_err());
    }

    #[test]
    fn id_placeholder_casts_only_on_postgres() {
        assert_eq!(Dialect::Postgres.id_placeholder(2), "CAST($2 AS UUID)");
        assert_eq!(Dialect::Sqlite.id_placeholder(2), "$2");
    }

    // -- adapt --

    #[test]
    fn sqlite_gets_text_primary_key() {
        let out = adapt(r#""id" UUID PRIMARY KEY"#, Dialect::Sqlite);
        assert_eq!(out, r#""id" TEXT PRIMARY KEY"#);
    }

    #[test]
    fn postgres_keeps_uuid_primary_key() {
        let input = r#""id" UUID PRIMARY KEY"#;
        assert_eq!(adapt(input, Dialect::Postgres), input);
    }

    #[test]
    fn sqlite_rewrites_foreign_key_uuid_columns() {
        let out = adapt("role_id uuid NOT NULL REFERENCES roles(id)", Dialect::Sqlite);
        assert_eq!(out, "role_id TEXT NOT NULL REFERENCES roles(id)");
    }

    #[test]
    fn sqlite_rewrites_current_timestamp_default() {
        let out = adapt(
            "created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()",
            Dialect::Sqlite,
        );
        assert_eq!(out, "created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP");
    }

    #[test]
    fn postgres_keeps_now() {
        let input = "created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()";
        assert_eq!(adapt(input, Dialect::Postgres), input);
    }

    #[test]
    fn identifiers_containing_uuid_are_untouched() {
        let input = "external_uuid_ref TEXT";
        assert_eq!(adapt(input, Dialect::Sqlite), input);
    }

    #[test]
    fn admin_statements_removed_for_every_dialect() {
        let script = "CREATE DATABASE muac;\n\\c muac\nUSE muac;\nCREATE TABLE t (x INTEGER);\n";
        for dialect in [Dialect::Postgres, Dialect::Sqlite] {
            assert_eq!(adapt(script, dialect), "CREATE TABLE t (x INTEGER);\n");
        }
    }

    #[test]
    fn admin_detection_ignores_lookalikes() {
        assert!(is_admin_line("  create database muac;"));
        assert!(is_admin_line("\\connect muac"));
        assert!(!is_admin_line("CREATE TABLE databases (id INTEGER);"));
        assert!(!is_admin_line("-- users table"));
    }
}
