//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("Location", "Columbus");
        assert_eq!(err.to_string(), "Location not found: Columbus");
    }

    #[test]
    fn invalid_coordinates_converts() {
        let err: DomainError = InvalidCoordinates.into();
        assert!(matches!(err, DomainError::InvalidCoordinates(_)));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("humidity out of range".to_string());
        assert_eq!(err.to_string(), "Validation failed: humidity out of range");
    }
}
