//! Domain-level error types.

use thiserror::Error;

use crate::ports::MediaError;

/// Domain errors - the taxonomy surfaced by every resource operation.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Client-supplied data violates a required-field or type constraint.
    #[error("{0}")]
    Validation(String),

    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str, id: String },

    /// The id could not be parsed at all. Reported with the not-found kind.
    #[error("Invalid {} ID", .entity_type.to_lowercase())]
    MalformedId { entity_type: &'static str, id: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::Internal("record vanished during write".to_string()),
            RepoError::Constraint(msg) => DomainError::Validation(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

impl From<MediaError> for DomainError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::NotConfigured(msg) => DomainError::Configuration(msg),
            MediaError::Rejected(msg) | MediaError::Unreachable(msg) => DomainError::Upload(msg),
        }
    }
}
