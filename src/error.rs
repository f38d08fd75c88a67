//! Custom error types for erp-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for erp-cli operations
#[derive(Error, Debug)]
pub enum ErpError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV table reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// A value rejected by its field validator
    #[error("Validation error: {0}")]
    Validation(String),

    /// Date construction with an out-of-range or non-numeric part
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A stored cell that cannot be interpreted (e.g. a non-numeric price)
    #[error("Malformed data: {0}")]
    Data(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Input stream closed while a prompt was waiting
    #[error("Input interrupted")]
    Interrupted,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ErpError {
    /// Create a "not found" error for a record identifier
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Record",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a value searched in a column
    pub fn value_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Value",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a column header
    pub fn column_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Column",
            identifier: identifier.into(),
        }
    }

    /// Create a data error for arithmetic that leaves the `i64` range
    pub fn overflow(what: impl std::fmt::Display) -> Self {
        Self::Data(format!("{} overflows", what))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ErpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ErpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ErpError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for erp-cli operations
pub type ErpResult<T> = Result<T, ErpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ErpError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ErpError::record_not_found("kH14Jt#&");
        assert_eq!(err.to_string(), "Record not found: kH14Jt#&");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_invalid_date_error() {
        let err = ErpError::InvalidDate("month 13 out of range".into());
        assert_eq!(err.to_string(), "Invalid date: month 13 out of range");
    }

    #[test]
    fn test_overflow_error() {
        let err = ErpError::overflow("amount due of 'kH14Jt#&'");
        assert!(matches!(err, ErpError::Data(_)));
        assert_eq!(err.to_string(), "Malformed data: amount due of 'kH14Jt#&' overflows");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let erp_err: ErpError = io_err.into();
        assert!(matches!(erp_err, ErpError::Io(_)));
    }
}
