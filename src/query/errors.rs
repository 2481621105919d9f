//! Query compilation error types
//!
//! Error codes:
//! - DOCFILTER_QUERY_UNKNOWN_OPERATOR
//! - DOCFILTER_QUERY_MALFORMED_COMBINATOR
//! - DOCFILTER_QUERY_MALFORMED
//! - DOCFILTER_UNKNOWN_SCHEMA
//!
//! Every error aborts the whole compilation; no partial filter is returned.
//! Failures are a pure function of (schema, query), so none is retryable.

use thiserror::Error;

use super::category::QueryCategory;
use crate::schema::SchemaError;

/// Result type for query compilation
pub type QueryResult<T> = Result<T, QueryError>;

/// Query compilation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Operator key not legal for the path's category
    #[error("Failed to build a query due to an unknown query key \"{key}\" at \"{path}\" (@{category})")]
    UnknownOperator {
        path: String,
        category: QueryCategory,
        key: String,
    },

    /// Combinator bound to something other than a list
    #[error("Combinator \"{combinator}\" at \"{path}\" must be bound to a list of queries")]
    MalformedCombinator { path: String, combinator: String },

    /// Query node of the wrong shape
    #[error("Malformed query at \"{path}\": {reason}")]
    MalformedQuery { path: String, reason: String },

    /// Compiler construction failed to resolve the schema
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl QueryError {
    /// Create an unknown operator error
    pub fn unknown_operator(
        path: impl Into<String>,
        category: QueryCategory,
        key: impl Into<String>,
    ) -> Self {
        QueryError::UnknownOperator {
            path: path.into(),
            category,
            key: key.into(),
        }
    }

    /// Create a malformed query error
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::MalformedQuery {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::UnknownOperator { .. } => "DOCFILTER_QUERY_UNKNOWN_OPERATOR",
            QueryError::MalformedCombinator { .. } => "DOCFILTER_QUERY_MALFORMED_COMBINATOR",
            QueryError::MalformedQuery { .. } => "DOCFILTER_QUERY_MALFORMED",
            QueryError::Schema(err) => err.code(),
        }
    }

    /// Returns the query path the error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            QueryError::UnknownOperator { path, .. }
            | QueryError::MalformedCombinator { path, .. }
            | QueryError::MalformedQuery { path, .. } => Some(path),
            QueryError::Schema(_) => None,
        }
    }
}
