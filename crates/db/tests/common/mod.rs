//! Shared fixtures for `muac-db` integration tests.
//!
//! Each test gets its own SQLite file in a temporary directory, driven
//! through the same `AnyPool` code path production uses.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use muac_core::bands::MuacThresholds;
use muac_core::dialect::Dialect;
use muac_core::password::AdminCredentials;
use muac_db::schema::ensure_schema;
use muac_db::seed::{RecordingReporter, SeedConfig, Seeder};
use muac_db::DbPool;
use tempfile::TempDir;

pub const ADMIN_PASSWORD: &str = "integration-test-secret";

/// A pool plus the directory keeping its database file alive.
pub struct TestDb {
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../db/schema.sql")
}

/// A brand-new, empty SQLite database.
pub async fn empty_db() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("muac.db").display());
    let pool = muac_db::create_pool(&url, 1)
        .await
        .expect("sqlite pool should open");
    TestDb { pool, _dir: dir }
}

/// A database with the schema created but no reference data.
pub async fn schema_db() -> TestDb {
    let db = empty_db().await;
    ensure_schema(&db.pool, &schema_path(), Dialect::Sqlite)
        .await
        .expect("schema bootstrap should succeed");
    db
}

pub fn seed_config(password: Option<&str>) -> SeedConfig {
    SeedConfig {
        thresholds: MuacThresholds::default(),
        admin: AdminCredentials {
            username: "admin".to_string(),
            email: "admin@clinic.example".to_string(),
            full_name: "Clinic Administrator".to_string(),
            password: password.map(str::to_string),
        },
    }
}

/// A seeder with a supplied password and an inspectable reporter.
pub fn seeder() -> (Seeder, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    let seeder = Seeder::new(seed_config(Some(ADMIN_PASSWORD))).with_reporter(reporter.clone());
    (seeder, reporter)
}

/// A database with schema and a completed fresh seed.
pub async fn seeded_db() -> TestDb {
    let db = schema_db().await;
    let (seeder, _) = seeder();
    seeder
        .seed_database(&db.pool)
        .await
        .expect("fresh seed should succeed");
    db
}

pub async fn count(pool: &DbPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("count {table} failed: {e}"))
}

pub async fn exec(pool: &DbPool, sql: &str) {
    sqlx::query(sql)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("`{sql}` failed: {e}"));
}

pub async fn table_exists(pool: &DbPool, table: &str) -> bool {
    sqlx::query_scalar::<_, i64>(Dialect::Sqlite.table_exists_query())
        .bind(table)
        .fetch_one(pool)
        .await
        .expect("sqlite_master query")
        > 0
}
