use thiserror::Error;

use models::errors::ModelError;

/// Errors raised by the student workflows.
#[derive(Debug, Error)]
pub enum StudentError {
    /// Caller-supplied data violates a business precondition.
    #[error("{0}")]
    BadRequest(String),
    #[error("Student with id {0} does not exists")]
    NotFound(i64),
    #[error("validation failed: {0}")]
    Validation(String),
    /// Store failure, passed through untouched.
    #[error("repository error: {0}")]
    Repository(String),
}

impl StudentError {
    pub fn email_taken(email: &str) -> Self { Self::BadRequest(format!("Email {} taken", email)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            StudentError::Validation(_) => 1001,
            StudentError::BadRequest(_) => 1002,
            StudentError::NotFound(_) => 1003,
            StudentError::Repository(_) => 1200,
        }
    }
}

impl From<ModelError> for StudentError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => StudentError::Validation(msg),
            ModelError::Db(msg) => StudentError::Repository(msg),
        }
    }
}
