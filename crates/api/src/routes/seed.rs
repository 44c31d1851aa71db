//! Route definitions for `/admin/seed`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::seed;
use crate::state::AppState;

/// Routes mounted at `/admin/seed`.
///
/// ```text
/// GET    /status                  -> get_status
/// POST   /validate                -> validate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(seed::get_status))
        .route("/validate", post(seed::validate))
}
