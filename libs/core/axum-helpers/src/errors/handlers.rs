use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback handler returning the standard JSON 404 body
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

/// 405 handler for routes that exist with other methods
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "The HTTP method is not allowed for this resource".to_string(),
        ErrorCode::ValidationError,
    )
}
