use database::DatabaseError;
use thiserror::Error;

/// Errors from pipeline mutations and reads.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected input (missing name, unknown deal type or stage).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced deal does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store I/O failure.
    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for PipelineError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => {
                PipelineError::NotFound(format!("{} {}", entity, id))
            }
            other => PipelineError::Database(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
