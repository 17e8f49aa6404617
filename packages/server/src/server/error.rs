//! Mapping from job errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domains::jobs::JobError;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by route handlers. Always rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Job(JobError),
    /// Body could not be read as the expected JSON shape
    BadRequest(String),
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        ApiError::Job(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Job(JobError::Validation(message)) => (StatusCode::BAD_REQUEST, message),
            ApiError::Job(JobError::NotFound) => {
                (StatusCode::NOT_FOUND, JobError::NotFound.to_string())
            }
            ApiError::Job(JobError::Storage(e)) => {
                tracing::error!(error = %e, "Job store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
