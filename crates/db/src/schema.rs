//! Schema bootstrap from the portable declaration script.
//!
//! The presence of the `roles` table marks an initialised store. When it is
//! absent, the script is adapted to the dialect, split, and executed in one
//! transaction: the schema ends up either complete or not there at all.

use std::path::Path;

use muac_core::dialect::Dialect;
use muac_core::script::ScriptDocument;
use serde::Serialize;

use crate::error::{BootstrapError, TransactionAction};
use crate::DbPool;

/// Table whose existence means the schema has already been created.
pub const SCHEMA_MARKER_TABLE: &str = "roles";

/// What [`ensure_schema`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SchemaOutcome {
    /// The marker table existed; nothing was executed.
    AlreadyPresent,
    /// The script ran and committed this many statements.
    Created { statements: usize },
}

/// Whether the schema marker table exists.
pub async fn schema_present(pool: &DbPool, dialect: Dialect) -> Result<bool, BootstrapError> {
    let count = sqlx::query_scalar::<_, i64>(dialect.table_exists_query())
        .bind(SCHEMA_MARKER_TABLE)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Create the schema from `script_path` unless it is already present.
pub async fn ensure_schema(
    pool: &DbPool,
    script_path: &Path,
    dialect: Dialect,
) -> Result<SchemaOutcome, BootstrapError> {
    if schema_present(pool, dialect).await? {
        tracing::debug!(marker = SCHEMA_MARKER_TABLE, "Schema already present");
        return Ok(SchemaOutcome::AlreadyPresent);
    }

    let document =
        ScriptDocument::load(script_path, dialect).map_err(|source| BootstrapError::Io {
            path: script_path.to_path_buf(),
            source,
        })?;

    let statements = apply_script(pool, &document).await?;
    tracing::info!(
        %dialect,
        statements,
        path = %script_path.display(),
        "Schema created"
    );
    Ok(SchemaOutcome::Created { statements })
}

/// Execute every statement of `document` in a single transaction.
///
/// On the first failure the transaction is rolled back and the offending
/// statement is returned inside [`BootstrapError::Execution`].
pub async fn apply_script(
    pool: &DbPool,
    document: &ScriptDocument,
) -> Result<usize, BootstrapError> {
    let statements = document.statements();

    let mut tx = pool
        .begin()
        .await
        .map_err(BootstrapError::transaction(TransactionAction::Begin))?;

    for statement in &statements {
        if let Err(source) = sqlx::query(statement.as_str()).execute(&mut *tx).await {
            tx.rollback()
                .await
                .map_err(BootstrapError::transaction(TransactionAction::Rollback))?;
            return Err(BootstrapError::Execution {
                statement: statement.to_string(),
                source,
            });
        }
    }

    tx.commit()
        .await
        .map_err(BootstrapError::transaction(TransactionAction::Commit))?;
    Ok(statements.len())
}
