//! Query compilation subsystem for docfilter
//!
//! Translates abstract, schema-typed queries into document-store filters.
//!
//! Pipeline:
//! 1. A schema format is flattened into a [`TypeMap`] of dotted path -> category
//! 2. The caller's query is walked against the type map
//! 3. Each operator at a path is looked up in the category's translation
//!    table and its template instantiated with the operand
//! 4. Fragments are merged per path and assembled into a [`CompiledFilter`]
//!
//! Compilation is pure: the same schema and query always produce the same
//! filter, and tables are shared read-only across threads.

mod category;
mod compiler;
mod errors;
mod extractor;
mod filter;
mod leaf;
mod operator;
mod tables;
mod template;
mod type_map;

pub use category::QueryCategory;
pub use compiler::{QueryCompiler, SchemaProvider};
pub use errors::{QueryError, QueryResult};
pub use extractor::{extract, NodeKind, QueryNode};
pub use filter::{CompiledFilter, FieldClause};
pub use leaf::{
    compile_element_query, compile_property, element_path, fold_fragment, merge_constraints,
    Conjuncts,
};
pub use operator::{Combinator, Operator, ONE_FULFILLS};
pub use tables::{lookup, table};
pub use template::{Placeholder, Template, ELEM_MATCH};
pub use type_map::TypeMap;
