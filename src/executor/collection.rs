//! In-memory document collection
//!
//! Executes compiled filters over a list of JSON documents.
//!
//! Find flow (strict order):
//! 1. Render the compiled filter to its document form
//! 2. Filter documents strictly according to the filter
//! 3. Apply sort (if specified)
//! 4. Apply offset, then limit
//! 5. Return the page with the total match count

use serde_json::Value;

use crate::query::CompiledFilter;

use super::errors::{ExecutorError, ExecutorResult};
use super::matcher::DocumentMatcher;
use super::result::FindResult;
use super::sorter::{ResultSorter, SortSpec};

/// Page size used when no limit is given
pub const DEFAULT_LIMIT: usize = 100;

/// Runs compiled filters against a document source
pub trait FilterExecutor {
    /// Returns every matching document, in source order
    fn execute(&self, filter: &CompiledFilter) -> ExecutorResult<Vec<Value>>;

    /// Returns the number of matching documents
    fn count(&self, filter: &CompiledFilter) -> ExecutorResult<usize> {
        self.execute(filter).map(|documents| documents.len())
    }
}

/// Paging and ordering for [`MemoryCollection::find`]
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub sort: Option<SortSpec>,
    /// Falls back to the collection's default limit when unset
    pub limit: Option<usize>,
    pub offset: usize,
}

/// Documents held in memory
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    documents: Vec<Value>,
    default_limit: usize,
}

impl MemoryCollection {
    /// Creates a collection from documents
    pub fn new(documents: Vec<Value>) -> Self {
        Self {
            documents,
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Creates a collection from a JSON array of documents
    pub fn from_json(value: Value) -> ExecutorResult<Self> {
        match value {
            Value::Array(documents) => {
                if let Some(position) = documents.iter().position(|doc| !doc.is_object()) {
                    return Err(ExecutorError::InvalidDocuments(format!(
                        "element {} is not an object",
                        position
                    )));
                }
                Ok(Self::new(documents))
            }
            _ => Err(ExecutorError::InvalidDocuments(
                "expected a list of documents".to_string(),
            )),
        }
    }

    /// Sets the page size used when a find gives no limit
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Returns all documents in insertion order
    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Finds one page of matching documents.
    ///
    /// Deterministic: same filter + same options + same documents = same page.
    pub fn find(&self, filter: &CompiledFilter, options: &FindOptions) -> ExecutorResult<FindResult> {
        let mut matched = self.execute(filter)?;
        let total = matched.len();

        if let Some(spec) = &options.sort {
            ResultSorter::sort(&mut matched, spec);
        }

        let limit = options.limit.unwrap_or(self.default_limit);
        let data: Vec<Value> = matched.into_iter().skip(options.offset).take(limit).collect();

        tracing::debug!(total, returned = data.len(), offset = options.offset, limit, "find completed");
        Ok(FindResult { data, total })
    }
}

impl FilterExecutor for MemoryCollection {
    fn execute(&self, filter: &CompiledFilter) -> ExecutorResult<Vec<Value>> {
        let document = filter.to_document();
        let mut matched = Vec::new();

        for candidate in &self.documents {
            if DocumentMatcher::matches(candidate, &document)? {
                matched.push(candidate.clone());
            }
        }

        Ok(matched)
    }
}
