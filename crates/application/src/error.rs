//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage unreachable (pool exhausted, database file unavailable)
    #[error("Connection error: {0}")]
    Connection(String),

    /// A storage operation failed (query error, constraint violation)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested entity does not exist in any tier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness race on location creation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Request failed boundary validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error originates from the storage layer
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Storage(_))
    }

    /// Stable class name used in error bodies and logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Domain(_) => "DomainError",
            Self::Connection(_) => "ConnectionError",
            Self::Storage(_) => "StorageError",
            Self::NotFound(_) => "NotFoundError",
            Self::Conflict(_) => "ConflictError",
            Self::ExternalService(_) => "ProviderError",
            Self::Validation(_) => "ValidationError",
            Self::Configuration(_) => "ConfigurationError",
            Self::Internal(_) => "InternalError",
        }
    }
}
