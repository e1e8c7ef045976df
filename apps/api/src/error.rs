use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campusforge_core::AppError;
use serde::Serialize;
use tracing::error;

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

/// HTTP API error wrapper around core application errors.
#[derive(Clone, Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Upstream { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Upstream errors already carry a caller-safe message; internal
        // details are logged here and replaced with a generic body.
        let payload = match self.0 {
            AppError::Upstream { message, code } => ErrorResponse { message, code },
            AppError::Internal(detail) => {
                error!(%detail, "request failed");
                ErrorResponse {
                    message: "internal server error".to_owned(),
                    code: None,
                }
            }
            other => ErrorResponse {
                message: other.to_string(),
                code: None,
            },
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
