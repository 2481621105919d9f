//! Schema store subsystem for docfilter
//!
//! Schemas are read-only inputs to the query compiler. This module only
//! models them, loads them from disk and hands out field-definition trees
//! by identifier.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{FieldDef, FieldType, Schema, SchemaFormat, Subtype};
