//! Query compiler
//!
//! Binds a schema's type map once and compiles any number of abstract
//! queries against it. A compiler holds no mutable state, so one instance
//! may be shared across threads.

use serde_json::Value;

use super::errors::{QueryError, QueryResult};
use super::extractor::{extract, QueryNode};
use super::filter::{CompiledFilter, FilterAssembler};
use super::leaf::{compile_element_query, compile_property};
use super::type_map::TypeMap;
use crate::schema::{SchemaFormat, SchemaResult};

/// Source of schema formats, keyed by schema identifier
pub trait SchemaProvider {
    /// Returns the format of the identified schema
    fn schema_format(&self, identifier: &str) -> SchemaResult<&SchemaFormat>;
}

/// Compiles abstract queries for one schema
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    schema_id: String,
    type_map: TypeMap,
}

impl QueryCompiler {
    /// Creates a compiler for the schema `identifier` known to `provider`
    pub fn new<P: SchemaProvider + ?Sized>(provider: &P, identifier: &str) -> QueryResult<Self> {
        let format = provider.schema_format(identifier)?;
        Ok(Self::from_format(identifier, format))
    }

    /// Creates a compiler directly from a schema format
    pub fn from_format(identifier: impl Into<String>, format: &SchemaFormat) -> Self {
        let schema_id = identifier.into();
        let type_map = TypeMap::build(format);
        tracing::debug!(schema = %schema_id, paths = type_map.len(), "query compiler ready");

        Self {
            schema_id,
            type_map,
        }
    }

    /// Identifier of the bound schema
    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// Queryable paths of the bound schema
    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    /// Compiles an abstract query into a store-native filter.
    ///
    /// Nodes carrying `$and` / `$or` / `$either` have each list item
    /// compiled as an independent clause; any remaining operators on the
    /// node form one plain clause alongside them.
    pub fn compile(&self, query: &Value) -> QueryResult<CompiledFilter> {
        let nodes = extract(&self.type_map, query)?;
        let mut assembler = FilterAssembler::default();

        for node in &nodes {
            self.compile_node(node, &mut assembler)?;
        }

        let filter = assembler.finish();
        tracing::debug!(
            schema = %self.schema_id,
            and = filter.and_group().len(),
            or = filter.or_group().len(),
            "query compiled"
        );
        Ok(filter)
    }

    fn compile_node(&self, node: &QueryNode<'_>, assembler: &mut FilterAssembler) -> QueryResult<()> {
        tracing::trace!(path = %node.path, category = %node.category, kind = ?node.kind(), "compiling node");

        if node.element_body {
            if let Some(element) = node.category.element() {
                for envelope in compile_element_query(&node.path, element, node.body)? {
                    assembler.push_plain(&node.path, envelope);
                }
            }
            return Ok(());
        }

        for (combinator, key, value) in node.combinators() {
            let items = value.as_array().ok_or_else(|| QueryError::MalformedCombinator {
                path: node.path.clone(),
                combinator: key.clone(),
            })?;

            let item_path = format!("{}.{}", node.path, key);
            for item in items {
                let entries = item.as_object().ok_or_else(|| {
                    QueryError::malformed(&item_path, "combinator items must be objects of operators")
                })?;
                let conjuncts = compile_property(&node.path, node.category, entries)?;
                assembler.hoist(combinator, &node.path, conjuncts);
            }
        }

        for constraints in compile_property(&node.path, node.category, node.plain_entries())? {
            assembler.push_plain(&node.path, constraints);
        }

        Ok(())
    }
}
