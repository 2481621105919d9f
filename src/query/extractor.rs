//! Query path extraction
//!
//! Walks a caller's query tree in lock-step with the type map and yields
//! the terminal node found at every mapped path. Keys may be spelled nested
//! (`{ "address": { "city": .. } }`) or dotted (`{ "address.city": .. }`).
//! The element query of an array may also be spelled `<path>.one_fulfills`.
//!
//! Paths absent from the type map are ignored.

use serde_json::{Map, Value};

use super::category::QueryCategory;
use super::errors::{QueryError, QueryResult};
use super::operator::{Combinator, ONE_FULFILLS};
use super::type_map::TypeMap;

/// How a terminal node is to be compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Flat operator object
    Plain,
    /// Carries at least one `$and` / `$or` / `$either` key
    Combined,
    /// Array path carrying an element query under `one_fulfills`
    ElementMatch,
}

/// A terminal node of the query, bound to a mapped path
#[derive(Debug, Clone, PartialEq)]
pub struct QueryNode<'q> {
    /// Dotted field path
    pub path: String,
    /// Category of the path
    pub category: QueryCategory,
    /// Operator object found at the path
    pub body: &'q Map<String, Value>,
    /// `body` is the element query of the array at `path`
    pub element_body: bool,
}

impl<'q> QueryNode<'q> {
    /// Classifies the node
    pub fn kind(&self) -> NodeKind {
        if self.element_body {
            NodeKind::ElementMatch
        } else if self.combinators().next().is_some() {
            NodeKind::Combined
        } else if self.category.is_array() && self.body.contains_key(ONE_FULFILLS) {
            NodeKind::ElementMatch
        } else {
            NodeKind::Plain
        }
    }

    /// Combinator entries, in query order
    pub fn combinators(&self) -> impl Iterator<Item = (Combinator, &'q String, &'q Value)> {
        let body: &'q Map<String, Value> = self.body;
        body.iter()
            .filter_map(|(key, value)| Combinator::from_key(key).map(|c| (c, key, value)))
    }

    /// Operator entries that are not combinators, in query order
    pub fn plain_entries(&self) -> impl Iterator<Item = (&'q String, &'q Value)> {
        let body: &'q Map<String, Value> = self.body;
        body.iter()
            .filter(|(key, _)| Combinator::from_key(key).is_none())
    }
}

/// Extracts the terminal nodes of `query` in query order.
///
/// A `null` query is the empty query.
pub fn extract<'q>(type_map: &TypeMap, query: &'q Value) -> QueryResult<Vec<QueryNode<'q>>> {
    let mut nodes = Vec::new();

    match query {
        Value::Null => {}
        Value::Object(root) => walk(type_map, root, None, &mut nodes)?,
        _ => return Err(QueryError::malformed("", "query must be an object")),
    }

    Ok(nodes)
}

fn walk<'q>(
    type_map: &TypeMap,
    map: &'q Map<String, Value>,
    prefix: Option<&str>,
    nodes: &mut Vec<QueryNode<'q>>,
) -> QueryResult<()> {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        if let Some(category) = type_map.get(&path) {
            let body = value.as_object().ok_or_else(|| {
                QueryError::malformed(&path, "expected an object of query operators")
            })?;
            nodes.push(QueryNode {
                path,
                category,
                body,
                element_body: false,
            });
            continue;
        }

        if let Some((array_path, category)) = element_query_target(type_map, &path) {
            let body = value.as_object().ok_or_else(|| {
                QueryError::malformed(&path, "element query must be an object of operators")
            })?;
            nodes.push(QueryNode {
                path: array_path.to_string(),
                category,
                body,
                element_body: true,
            });
            continue;
        }

        match value {
            Value::Object(inner) if type_map.has_descendants(&path) => {
                walk(type_map, inner, Some(&path), nodes)?;
            }
            _ => tracing::debug!(path = %path, "query path not in schema, ignored"),
        }
    }

    Ok(())
}

/// Resolves `<path>.one_fulfills` to its array path and category
fn element_query_target<'p>(type_map: &TypeMap, path: &'p str) -> Option<(&'p str, QueryCategory)> {
    let array_path = path.strip_suffix(ONE_FULFILLS)?.strip_suffix('.')?;
    type_map
        .get(array_path)
        .filter(|category| category.is_array())
        .map(|category| (array_path, category))
}
