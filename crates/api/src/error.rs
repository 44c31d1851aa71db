use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use muac_db::error::BootstrapError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A schema or seeding error from `muac_db`.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Bootstrap(BootstrapError::Validation(missing)) => (
                StatusCode::CONFLICT,
                "SEED_INCOMPLETE",
                format!("Reference data is incomplete: missing {missing}"),
            ),
            AppError::Bootstrap(other) => {
                tracing::error!(error = %other, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use muac_db::error::MissingSeedItem;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_seed_item_is_a_conflict() {
        let err = AppError::from(BootstrapError::Validation(MissingSeedItem::AdminAccount));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "SEED_INCOMPLETE");
        assert!(body["error"].as_str().unwrap().contains("administrator account"));
    }

    #[tokio::test]
    async fn other_failures_are_sanitized() {
        let err = AppError::from(BootstrapError::Database(sqlx::Error::PoolClosed));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"], "An internal error occurred");
    }
}
