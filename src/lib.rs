//! docfilter - a schema-typed query compiler for document-store filters
//!
//! Callers write queries against a schema's field names using abstract
//! operators (`greater_than`, `contains_one_of`, ...). The compiler checks
//! each operator against the field's category and emits the store's native
//! filter document.

pub mod cli;
pub mod executor;
pub mod functions;
pub mod query;
pub mod schema;
