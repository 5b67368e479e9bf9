//! Custom error types for the brand registry
//!
//! This module defines the error hierarchy for the registry using thiserror.
//! The four domain kinds (not found, conflict, validation, persistence) are
//! propagated to callers untouched; the remaining variants cover the ambient
//! concerns of the binary (configuration, export, raw I/O).

use thiserror::Error;

/// The main error type for registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the storage layer
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed input: bad filters, empty search strings, rejected transitions
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced brand or audit record does not exist
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Uniqueness violation
    #[error("{entity_type} with {field} '{value}' already exists")]
    Conflict {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },

    /// Backing-store failure; nothing from the failed operation was committed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl RegistryError {
    /// Create a "not found" error for brands
    pub fn brand_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Brand",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for audit records
    pub fn audit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Audit record",
            identifier: identifier.into(),
        }
    }

    /// Create a conflict error for a taken registration number
    pub fn registration_number_taken(value: impl Into<String>) -> Self {
        Self::Conflict {
            entity_type: "Brand",
            field: "registration number",
            value: value.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = RegistryError::brand_not_found("brd-7");
        assert_eq!(err.to_string(), "Brand not found: brd-7");
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_conflict_error() {
        let err = RegistryError::registration_number_taken("RN-1");
        assert_eq!(
            err.to_string(),
            "Brand with registration number 'RN-1' already exists"
        );
        assert!(err.is_conflict());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RegistryError = io_err.into();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}
