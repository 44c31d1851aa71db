#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use muac_core::bands::MuacThresholds;
use muac_core::dialect::Dialect;
use muac_core::password::AdminCredentials;
use muac_db::schema::ensure_schema;
use muac_db::seed::{SeedConfig, Seeder};
use muac_db::DbPool;
use tempfile::TempDir;
use tower::ServiceExt;

use muac_api::config::ServerConfig;
use muac_api::router::build_app_router;
use muac_api::state::AppState;

/// A pool plus the directory keeping its database file alive.
pub struct TestDb {
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
    }
}

/// A fresh SQLite database with the schema applied.
pub async fn schema_db() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("muac.db").display());
    let pool = muac_db::create_pool(&url, 1).await.expect("sqlite pool");
    let script = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../db/schema.sql");
    ensure_schema(&pool, &script, Dialect::Sqlite)
        .await
        .expect("schema bootstrap");
    TestDb { pool, _dir: dir }
}

/// Schema plus a completed fresh seed.
pub async fn seeded_db() -> TestDb {
    let db = schema_db().await;
    let config = SeedConfig {
        thresholds: MuacThresholds::default(),
        admin: AdminCredentials {
            username: "admin".to_string(),
            email: "admin@clinic.example".to_string(),
            full_name: "Clinic Administrator".to_string(),
            password: Some("api-test-password".to_string()),
        },
    };
    Seeder::new(config)
        .seed_database(&db.pool)
        .await
        .expect("fresh seed");
    db
}

/// Build the application router with the production middleware stack.
pub fn build_test_app(pool: DbPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
