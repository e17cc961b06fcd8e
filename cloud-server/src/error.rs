//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use phishguard_core::DetectError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Validation errors
    InvalidInput(String),
    UnsupportedFormat(String),

    // External service errors (safety net; the core absorbs these)
    UpstreamError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::UnsupportedFormat(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.as_str()),
            AppError::UpstreamError(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, "External lookup failed")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<DetectError> for AppError {
    fn from(err: DetectError) -> Self {
        match err {
            DetectError::InvalidInput(msg) => AppError::InvalidInput(msg),
            DetectError::UnsupportedFormat(msg) => AppError::UnsupportedFormat(msg),
            // Upstream faults never escape the detection core; if one
            // does, surface it as a gateway problem rather than a panic.
            DetectError::UpstreamTimeout(d) => {
                AppError::UpstreamError(format!("lookup timed out after {:?}", d))
            }
            DetectError::UpstreamUnavailable(msg) => AppError::UpstreamError(msg),
            DetectError::Internal(msg) => AppError::InternalError(msg),
        }
    }
}
