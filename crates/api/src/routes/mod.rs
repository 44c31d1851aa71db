pub mod health;
pub mod seed;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /admin/seed/status        seeding status (GET)
/// /admin/seed/validate      integrity check (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin/seed", seed::router())
}
