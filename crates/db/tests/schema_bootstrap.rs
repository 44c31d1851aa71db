mod common;

use assert_matches::assert_matches;
use muac_core::dialect::Dialect;
use muac_db::error::BootstrapError;
use muac_db::schema::{ensure_schema, schema_present, SchemaOutcome};

use common::{empty_db, schema_path, table_exists};

const TABLES: [&str; 7] = [
    "roles",
    "accounts",
    "tags",
    "recommendations",
    "faqs",
    "patients",
    "measurements",
];

#[tokio::test]
async fn creates_every_table_on_an_empty_store() {
    let db = empty_db().await;
    assert!(!schema_present(&db.pool, Dialect::Sqlite).await.unwrap());

    let outcome = ensure_schema(&db.pool, &schema_path(), Dialect::Sqlite)
        .await
        .unwrap();

    assert_matches!(outcome, SchemaOutcome::Created { statements } if statements >= TABLES.len());
    for table in TABLES {
        assert!(table_exists(&db.pool, table).await, "{table} missing");
    }
}

#[tokio::test]
async fn second_run_executes_nothing() {
    let db = empty_db().await;
    ensure_schema(&db.pool, &schema_path(), Dialect::Sqlite)
        .await
        .unwrap();

    let outcome = ensure_schema(&db.pool, &schema_path(), Dialect::Sqlite)
        .await
        .unwrap();
    assert_eq!(outcome, SchemaOutcome::AlreadyPresent);
}

#[tokio::test]
async fn present_marker_skips_even_a_missing_script() {
    let db = empty_db().await;
    common::exec(&db.pool, "CREATE TABLE roles (id TEXT PRIMARY KEY)").await;

    let outcome = ensure_schema(
        &db.pool,
        std::path::Path::new("/nonexistent/schema.sql"),
        Dialect::Sqlite,
    )
    .await
    .unwrap();
    assert_eq!(outcome, SchemaOutcome::AlreadyPresent);
}

#[tokio::test]
async fn unreadable_script_is_an_io_error() {
    let db = empty_db().await;
    let missing = std::path::Path::new("/nonexistent/schema.sql");

    let err = ensure_schema(&db.pool, missing, Dialect::Sqlite)
        .await
        .unwrap_err();
    assert_matches!(err, BootstrapError::Io { path, .. } if path == missing);
}

#[tokio::test]
async fn failing_statement_rolls_back_the_whole_script() {
    let db = empty_db().await;
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("broken.sql");
    std::fs::write(
        &script,
        "CREATE TABLE roles (id UUID PRIMARY KEY, name TEXT NOT NULL);\n\
         CREATE TABLE tags (id UUID PRIMARY KEY);\n\
         CREATE TABLE broken (;\n\
         CREATE TABLE faqs (id UUID PRIMARY KEY);\n",
    )
    .unwrap();

    let err = ensure_schema(&db.pool, &script, Dialect::Sqlite)
        .await
        .unwrap_err();

    assert_matches!(err, BootstrapError::Execution { statement, .. } if statement == "CREATE TABLE broken (");
    assert!(!table_exists(&db.pool, "roles").await);
    assert!(!table_exists(&db.pool, "tags").await);
    assert!(!table_exists(&db.pool, "faqs").await);
}

#[tokio::test]
async fn admin_lines_and_comments_do_not_reach_the_engine() {
    let db = empty_db().await;
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("schema.sql");
    std::fs::write(
        &script,
        "CREATE DATABASE muac;\n\
         \\c muac\n\
         -- roles first; everything else depends on it\n\
         CREATE TABLE roles (\n\
             id UUID PRIMARY KEY, /* text on sqlite; uuid elsewhere */\n\
             name TEXT NOT NULL DEFAULT 'it''s; fine',\n\
             created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\n\
         );\n",
    )
    .unwrap();

    let outcome = ensure_schema(&db.pool, &script, Dialect::Sqlite)
        .await
        .unwrap();
    assert_eq!(outcome, SchemaOutcome::Created { statements: 1 });
    assert!(table_exists(&db.pool, "roles").await);
}
