//! Handlers for reference-data seeding status and validation.

use axum::extract::State;
use axum::Json;
use muac_db::seed::{get_seeding_status, validate_seed_data, SeedingStatus};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
}

/// GET /admin/seed/status
pub async fn get_status(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SeedingStatus>>> {
    let status = get_seeding_status(&state.pool).await?;
    Ok(Json(DataResponse { data: status }))
}

/// POST /admin/seed/validate
///
/// Responds 409 `SEED_INCOMPLETE` naming the first missing item.
pub async fn validate(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ValidationResult>>> {
    validate_seed_data(&state.pool).await?;
    Ok(Json(DataResponse {
        data: ValidationResult { valid: true },
    }))
}
