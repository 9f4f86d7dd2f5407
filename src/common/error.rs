use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Trajectory not found: {id}")]
    TrajectoryNotFound { id: i64 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

impl DomainError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        DomainError::InvalidInput { reason: reason.into() }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
