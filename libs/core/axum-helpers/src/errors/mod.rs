pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Wire shape of every error this service returns.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Task 68b1... not found"
/// }
/// ```
///
/// `code` is the stable integer for monitoring, `error` the machine-readable
/// identifier, `message` the human-readable text. `details` carries optional
/// structured context and is omitted when empty.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: i32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error with a direct mapping to HTTP responses.
///
/// Dependency error types convert in via `#[from]`; domain crates convert
/// their own taxonomies into the string variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Document store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Status, error code and client-facing message for this error.
    ///
    /// Internal failure variants deliberately hide their cause behind the
    /// code's default message; the real error only goes to the logs.
    fn parts(self) -> (StatusCode, ErrorCode, String) {
        use ErrorCode as C;
        use StatusCode as S;

        match self {
            AppError::SerdeJson(_) => (
                S::INTERNAL_SERVER_ERROR,
                C::SerdeJsonError,
                C::SerdeJsonError.default_message().to_string(),
            ),
            AppError::Store(_) => (
                S::INTERNAL_SERVER_ERROR,
                C::StoreError,
                C::StoreError.default_message().to_string(),
            ),
            AppError::Io(_) => (
                S::INTERNAL_SERVER_ERROR,
                C::IoError,
                C::IoError.default_message().to_string(),
            ),
            AppError::JsonExtractorRejection(e) => (e.status(), C::JsonExtraction, e.body_text()),
            AppError::BadRequest(msg) => (S::BAD_REQUEST, C::ValidationError, msg),
            AppError::NotFound(msg) => (S::NOT_FOUND, C::NotFound, msg),
            AppError::Conflict(msg) => (S::CONFLICT, C::Conflict, msg),
            AppError::InternalServerError(msg) => (S::INTERNAL_SERVER_ERROR, C::InternalError, msg),
            AppError::ServiceUnavailable(msg) => {
                (S::SERVICE_UNAVAILABLE, C::ServiceUnavailable, msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log before converting: 5xx at error level with the full source,
        // client errors at info.
        match &self {
            AppError::SerdeJson(_)
            | AppError::Store(_)
            | AppError::Io(_)
            | AppError::InternalServerError(_) => {
                tracing::error!("Request failed: {self:?}");
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {msg}");
            }
            other => {
                tracing::info!("Client error: {other}");
            }
        }

        let (status, code, message) = self.parts();
        error_response(status, message, code)
    }
}

/// Build the standard JSON error body for a status/code/message triple
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
