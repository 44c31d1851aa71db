//! A declaration script bound to the dialect it will run against.

use std::path::Path;

use crate::dialect::{adapt, Dialect};
use crate::splitter::{split, Statement};

/// Raw script text plus its target dialect. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ScriptDocument {
    text: String,
    dialect: Dialect,
}

impl ScriptDocument {
    pub fn new(text: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            text: text.into(),
            dialect,
        }
    }

    /// Read the script at `path`.
    pub fn load(path: &Path, dialect: Dialect) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(text, dialect))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The script ported to its dialect and split into executable statements.
    pub fn statements(&self) -> Vec<Statement> {
        split(&adapt(&self.text, self.dialect))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SCRIPT: &str = "\
CREATE DATABASE muac;
-- roles; the schema marker
CREATE TABLE roles (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX idx_roles_name ON roles (name);
";

    #[test]
    fn statements_are_adapted_then_split() {
        let doc = ScriptDocument::new(SCRIPT, Dialect::Sqlite);
        let statements = doc.statements();

        assert_eq!(statements.len(), 2);
        assert!(statements[0].as_str().starts_with("CREATE TABLE roles"));
        assert!(statements[0].as_str().contains("id TEXT PRIMARY KEY"));
        assert!(statements[0].as_str().contains("DEFAULT CURRENT_TIMESTAMP"));
        assert_eq!(
            statements[1].as_str(),
            "CREATE INDEX idx_roles_name ON roles (name)"
        );
    }

    #[test]
    fn postgres_statements_keep_portable_types() {
        let doc = ScriptDocument::new(SCRIPT, Dialect::Postgres);
        let statements = doc.statements();

        assert_eq!(statements.len(), 2);
        assert!(statements[0].as_str().contains("id UUID PRIMARY KEY"));
        assert!(statements[0].as_str().contains("DEFAULT NOW()"));
    }

    #[test]
    fn load_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        let doc = ScriptDocument::load(file.path(), Dialect::Postgres).unwrap();
        assert_eq!(doc.text(), SCRIPT);
        assert_eq!(doc.dialect(), Dialect::Postgres);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScriptDocument::load(&dir.path().join("absent.sql"), Dialect::Sqlite)
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
