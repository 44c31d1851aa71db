//! Database layer: pool construction, schema bootstrap, repositories and the
//! reference-data seed orchestrator.
//!
//! Everything runs on a sqlx [`AnyPool`](sqlx::AnyPool) so a single code path
//! serves every supported [`Dialect`](muac_core::dialect::Dialect).

use muac_core::dialect::Dialect;
use sqlx::any::AnyPoolOptions;

pub mod config;
pub mod error;
pub mod repositories;
pub mod schema;
pub mod seed;

pub type DbPool = sqlx::AnyPool;

/// Create a connection pool from a database URL.
///
/// Registers the compiled-in drivers on first use.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::any::install_default_drivers();
    AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Resolve the dialect of the engine behind `conn`.
pub(crate) fn dialect_of(conn: &sqlx::AnyConnection) -> Result<Dialect, error::BootstrapError> {
    Ok(Dialect::from_backend_name(conn.backend_name())?)
}
