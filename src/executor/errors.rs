//! Executor error types
//!
//! Error codes:
//! - DOCFILTER_EXECUTION_UNKNOWN_OPERATOR
//! - DOCFILTER_EXECUTION_INVALID_REGEX
//! - DOCFILTER_EXECUTION_MALFORMED_FILTER
//! - DOCFILTER_EXECUTION_INVALID_DOCUMENTS

use thiserror::Error;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Errors raised while evaluating a filter against documents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// Filter operator the matcher does not implement
    #[error("Unsupported filter operator \"{0}\"")]
    UnknownOperator(String),

    /// `$regex` pattern or `$options` flags rejected
    #[error("Invalid regular expression \"{pattern}\": {reason}")]
    InvalidRegex { pattern: String, reason: String },

    /// Filter document of the wrong shape
    #[error("Malformed filter: {0}")]
    MalformedFilter(String),

    /// Input collection is not a list of documents
    #[error("Invalid documents: {0}")]
    InvalidDocuments(String),
}

impl ExecutorError {
    /// Create an invalid regex error
    pub fn invalid_regex(pattern: impl Into<String>, reason: impl ToString) -> Self {
        ExecutorError::InvalidRegex {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a malformed filter error
    pub fn malformed(reason: impl Into<String>) -> Self {
        ExecutorError::MalformedFilter(reason.into())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::UnknownOperator(_) => "DOCFILTER_EXECUTION_UNKNOWN_OPERATOR",
            ExecutorError::InvalidRegex { .. } => "DOCFILTER_EXECUTION_INVALID_REGEX",
            ExecutorError::MalformedFilter(_) => "DOCFILTER_EXECUTION_MALFORMED_FILTER",
            ExecutorError::InvalidDocuments(_) => "DOCFILTER_EXECUTION_INVALID_DOCUMENTS",
        }
    }
}
