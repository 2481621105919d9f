//! Schema error types
//!
//! Error codes:
//! - DOCFILTER_UNKNOWN_SCHEMA
//! - DOCFILTER_DUPLICATE_SCHEMA
//! - DOCFILTER_MALFORMED_SCHEMA

use thiserror::Error;

/// Result type for schema store operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No schema registered under the identifier
    #[error("Schema '{0}' not found")]
    UnknownSchema(String),

    /// A schema with the same identifier is already registered
    #[error("Schema '{0}' is already registered")]
    DuplicateSchema(String),

    /// A schema file could not be read or parsed
    #[error("Malformed schema at {location}: {reason}")]
    MalformedSchema { location: String, reason: String },
}

impl SchemaError {
    /// Create a malformed schema error
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::MalformedSchema {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownSchema(_) => "DOCFILTER_UNKNOWN_SCHEMA",
            SchemaError::DuplicateSchema(_) => "DOCFILTER_DUPLICATE_SCHEMA",
            SchemaError::MalformedSchema { .. } => "DOCFILTER_MALFORMED_SCHEMA",
        }
    }
}
