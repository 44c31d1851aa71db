//! Errors raised while bootstrapping the schema and seeding reference data.

use std::fmt;
use std::path::PathBuf;

use muac_core::error::CoreError;

use crate::seed::SeedStage;

/// Which transaction boundary failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionAction {
    Begin,
    Commit,
    Rollback,
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionAction::Begin => "begin",
            TransactionAction::Commit => "commit",
            TransactionAction::Rollback => "rollback",
        })
    }
}

/// The first reference item found missing by seed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingSeedItem {
    Role(String),
    Tag(String),
    Recommendation(String),
    AdminAccount,
}

impl fmt::Display for MissingSeedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingSeedItem::Role(name) => write!(f, "role '{name}'"),
            MissingSeedItem::Tag(code) => write!(f, "tag '{code}'"),
            MissingSeedItem::Recommendation(code) => write!(f, "recommendation for '{code}'"),
            MissingSeedItem::AdminAccount => f.write_str("administrator account"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The declaration script could not be read.
    #[error("Failed to read schema script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A schema statement failed; the whole script was rolled back.
    #[error("Statement failed: {source}\n--> {statement}")]
    Execution {
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Transaction {action} failed: {source}")]
    Transaction {
        action: TransactionAction,
        #[source]
        source: sqlx::Error,
    },

    /// A fresh-seed stage failed; nothing from the invocation was committed.
    #[error("Seeding stage '{stage}' failed: {source}")]
    Seed {
        stage: SeedStage,
        #[source]
        source: sqlx::Error,
    },

    #[error("Seed validation failed: missing {0}")]
    Validation(MissingSeedItem),

    /// Unsupported dialect, invalid thresholds or credential policy failures.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BootstrapError {
    pub(crate) fn transaction(action: TransactionAction) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| BootstrapError::Transaction { action, source }
    }
}
