use thiserror::Error;

/// Message returned when a create payload lacks title, company or location.
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

/// Errors produced by job operations.
#[derive(Debug, Error)]
pub enum JobError {
    /// Payload rejected before anything was written
    #[error("{0}")]
    Validation(String),

    /// No job with the requested id
    #[error("Job not found")]
    NotFound,

    /// Store failure (connection lost, constraint violation, ...)
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl JobError {
    pub fn validation(message: impl Into<String>) -> Self {
        JobError::Validation(message.into())
    }
}

pub type JobResult<T> = std::result::Result<T, JobError>;
