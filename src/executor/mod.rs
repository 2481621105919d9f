//! Filter executor subsystem for docfilter
//!
//! A reference document store that consumes compiled filters. It evaluates
//! store-native filter documents in memory so compiled queries can be run
//! end to end without an external database.
//!
//! # Guarantees
//!
//! - Deterministic results: same filter + same documents = same output
//! - Stable sort: equal keys keep insertion order
//! - Unsupported operators fail loudly instead of matching nothing

mod collection;
mod errors;
mod matcher;
mod result;
mod sorter;

pub use collection::{FilterExecutor, FindOptions, MemoryCollection, DEFAULT_LIMIT};
pub use errors::{ExecutorError, ExecutorResult};
pub use matcher::{resolve, DocumentMatcher};
pub use result::FindResult;
pub use sorter::{ResultSorter, SortDirection, SortSpec};
