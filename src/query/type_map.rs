//! Schema type map
//!
//! Flattens a schema's field-definition tree into a mapping from dotted
//! field path to query category. Built once per compiler and read-only
//! afterwards.

use indexmap::IndexMap;

use super::category::QueryCategory;
use crate::schema::{FieldType, SchemaFormat};

/// Flat mapping of dotted field path to query category, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    paths: IndexMap<String, QueryCategory>,
}

impl TypeMap {
    /// Builds the type map for a schema format.
    pub fn build(format: &SchemaFormat) -> Self {
        let mut map = Self::default();
        map.collect(format, None);
        map
    }

    fn collect(&mut self, format: &SchemaFormat, prefix: Option<&str>) {
        for (key, def) in format {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, key),
                None => key.clone(),
            };

            if let Some(category) = QueryCategory::of_field(def) {
                self.paths.insert(path, category);
                continue;
            }

            if def.field_type == FieldType::Object {
                if let Some(fields) = def.nested_fields() {
                    self.collect(fields, Some(&path));
                    continue;
                }
            }

            tracing::trace!(path = %path, field_type = def.field_type.type_name(), "field has no query category");
        }
    }

    /// Returns the category of a path, if it is queryable
    pub fn get(&self, path: &str) -> Option<QueryCategory> {
        self.paths.get(path).copied()
    }

    /// Returns true if the path is queryable
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Returns true if some queryable path lies below `prefix`
    pub fn has_descendants(&self, prefix: &str) -> bool {
        self.paths.keys().any(|path| {
            path.len() > prefix.len()
                && path.starts_with(prefix)
                && path.as_bytes()[prefix.len()] == b'.'
        })
    }

    /// Iterates over (path, category) pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, QueryCategory)> {
        self.paths.iter().map(|(path, category)| (path.as_str(), *category))
    }

    /// Returns the number of queryable paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no path is queryable
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use serde_json::json;

    fn nested_format() -> SchemaFormat {
        serde_json::from_value(json!({
            "name": { "type": "string" },
            "address": {
                "type": "object",
                "subtype": {
                    "city": { "type": "string" },
                    "geo": {
                        "type": "object",
                        "subtype": {
                            "lat": { "type": "number" },
                            "lng": { "type": "number" }
                        }
                    }
                }
            },
            "wallet": { "type": "array", "subtype": { "currency": { "type": "string" } } },
            "mood": { "type": "enum", "subtype": ["happy", "sad"] },
            "meta": { "type": "cloudedObject" }
        }))
        .unwrap()
    }

    #[test]
    fn test_flatten_nested_objects() {
        let map = TypeMap::build(&nested_format());

        assert_eq!(map.get("name"), Some(QueryCategory::String));
        assert_eq!(map.get("address.city"), Some(QueryCategory::String));
        assert_eq!(map.get("address.geo.lat"), Some(QueryCategory::Number));
        assert_eq!(map.get("address.geo.lng"), Some(QueryCategory::Number));
        assert_eq!(map.get("address"), None);
        assert_eq!(map.get("address.geo"), None);
    }

    #[test]
    fn test_arrays_and_opaque_objects() {
        let map = TypeMap::build(&nested_format());

        assert_eq!(map.get("wallet"), Some(QueryCategory::ObjectArray));
        assert_eq!(map.get("wallet.currency"), None);
        assert_eq!(map.get("meta"), Some(QueryCategory::Object));
    }

    #[test]
    fn test_unknown_type_skipped() {
        let map = TypeMap::build(&nested_format());

        assert!(!map.contains("mood"));
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn test_schema_order_kept() {
        let map = TypeMap::build(&nested_format());
        let paths: Vec<_> = map.iter().map(|(path, _)| path).collect();

        assert_eq!(
            paths,
            vec![
                "name",
                "address.city",
                "address.geo.lat",
                "address.geo.lng",
                "wallet",
                "meta"
            ]
        );
    }

    #[test]
    fn test_has_descendants() {
        let map = TypeMap::build(&nested_format());

        assert!(map.has_descendants("address"));
        assert!(map.has_descendants("address.geo"));
        assert!(!map.has_descendants("address.city"));
        assert!(!map.has_descendants("addr"));
    }

    #[test]
    fn test_empty_schema() {
        let map = TypeMap::build(&SchemaFormat::new());
        assert!(map.is_empty());

        let mut format = SchemaFormat::new();
        format.insert("tags".into(), FieldDef::array_of(FieldType::String));
        assert_eq!(
            TypeMap::build(&format).get("tags"),
            Some(QueryCategory::StringArray)
        );
    }
}
