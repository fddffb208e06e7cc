use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("A new task cannot already have an identifier")]
    IdConflict,

    #[error("Task payload has no identifier")]
    MissingId,

    #[error("Payload identifier '{body_id}' does not match addressed identifier '{path_id}'")]
    IdMismatch { path_id: String, body_id: String },

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses.
///
/// The three identifier-validation errors are client mistakes (400), absence
/// of the addressed record is 404, and store failures pass through opaquely
/// as 500.
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::IdConflict | TaskError::MissingId | TaskError::IdMismatch { .. } => {
                AppError::BadRequest(err.to_string())
            }
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            TaskError::Store(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for TaskError {
    fn from(err: mongodb::error::Error) -> Self {
        TaskError::Store(err.to_string())
    }
}
