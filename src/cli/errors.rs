//! CLI-specific error types
//!
//! Error codes:
//! - DOCFILTER_CLI_CONFIG_ERROR
//! - DOCFILTER_CLI_IO_ERROR
//! - DOCFILTER_CLI_INVALID_ARGUMENT
//!
//! Schema, query and executor errors keep their own codes.

use std::io;

use thiserror::Error;

use crate::executor::ExecutorError;
use crate::query::QueryError;
use crate::schema::SchemaError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable or invalid
    #[error("{0}")]
    Config(String),

    /// stdin/stdout or data file failure
    #[error("{0}")]
    Io(String),

    /// Argument value rejected after parsing
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Io(msg.into())
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CliError::InvalidArgument(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "DOCFILTER_CLI_CONFIG_ERROR",
            CliError::Io(_) => "DOCFILTER_CLI_IO_ERROR",
            CliError::InvalidArgument(_) => "DOCFILTER_CLI_INVALID_ARGUMENT",
            CliError::Schema(err) => err.code(),
            CliError::Query(err) => err.code(),
            CliError::Executor(err) => err.code(),
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryCategory;

    #[test]
    fn test_codes() {
        assert_eq!(CliError::config_error("x").code(), "DOCFILTER_CLI_CONFIG_ERROR");
        assert_eq!(CliError::io_error("x").code(), "DOCFILTER_CLI_IO_ERROR");
        assert_eq!(
            CliError::invalid_argument("x").code(),
            "DOCFILTER_CLI_INVALID_ARGUMENT"
        );
    }

    #[test]
    fn test_wrapped_errors_keep_codes() {
        let err: CliError =
            QueryError::unknown_operator("age", QueryCategory::Number, "between").into();
        assert_eq!(err.code(), "DOCFILTER_QUERY_UNKNOWN_OPERATOR");
        assert!(err.message().contains("between"));

        let err: CliError = SchemaError::UnknownSchema("abcd".into()).into();
        assert_eq!(err.code(), "DOCFILTER_UNKNOWN_SCHEMA");
    }

    #[test]
    fn test_json_error_is_io() {
        let err: CliError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.code(), "DOCFILTER_CLI_IO_ERROR");
        assert!(err.message().starts_with("JSON error"));
    }
}
