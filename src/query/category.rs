//! Query type categories
//!
//! Every queryable schema path is classified by base type and by whether it
//! holds a single value or a list. The category decides which operators are
//! legal on the path and how their operands serialize.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldDef, FieldType, Subtype};

/// Closed classification of a queryable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryCategory {
    String,
    Number,
    Boolean,
    Date,
    Object,
    StringArray,
    NumberArray,
    BooleanArray,
    DateArray,
    ObjectArray,
}

impl QueryCategory {
    /// All categories, scalars first
    pub const ALL: [QueryCategory; 10] = [
        QueryCategory::String,
        QueryCategory::Number,
        QueryCategory::Boolean,
        QueryCategory::Date,
        QueryCategory::Object,
        QueryCategory::StringArray,
        QueryCategory::NumberArray,
        QueryCategory::BooleanArray,
        QueryCategory::DateArray,
        QueryCategory::ObjectArray,
    ];

    /// Returns the category name used in messages and on the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryCategory::String => "string",
            QueryCategory::Number => "number",
            QueryCategory::Boolean => "boolean",
            QueryCategory::Date => "date",
            QueryCategory::Object => "object",
            QueryCategory::StringArray => "stringArray",
            QueryCategory::NumberArray => "numberArray",
            QueryCategory::BooleanArray => "booleanArray",
            QueryCategory::DateArray => "dateArray",
            QueryCategory::ObjectArray => "objectArray",
        }
    }

    /// Parses a category name as printed by [`QueryCategory::as_str`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }

    /// Returns true for list-valued categories
    pub fn is_array(&self) -> bool {
        self.element().is_some()
    }

    /// Returns the category of a single element for list-valued categories
    pub fn element(&self) -> Option<QueryCategory> {
        match self {
            QueryCategory::StringArray => Some(QueryCategory::String),
            QueryCategory::NumberArray => Some(QueryCategory::Number),
            QueryCategory::BooleanArray => Some(QueryCategory::Boolean),
            QueryCategory::DateArray => Some(QueryCategory::Date),
            QueryCategory::ObjectArray => Some(QueryCategory::Object),
            _ => None,
        }
    }

    /// Classifies a leaf field definition.
    ///
    /// Objects with a nested field map are not leaves and yield `None`; the
    /// type map descends into them instead. Unknown types also yield `None`.
    pub fn of_field(def: &FieldDef) -> Option<QueryCategory> {
        match def.field_type {
            FieldType::String => Some(QueryCategory::String),
            FieldType::Number => Some(QueryCategory::Number),
            FieldType::Boolean => Some(QueryCategory::Boolean),
            FieldType::Date => Some(QueryCategory::Date),
            FieldType::CloudedObject => Some(QueryCategory::Object),
            FieldType::Object => match def.subtype {
                Some(Subtype::Fields(_)) => None,
                _ => Some(QueryCategory::Object),
            },
            FieldType::Array => Self::of_array_subtype(def.subtype.as_ref()),
            FieldType::Unknown => None,
        }
    }

    fn of_array_subtype(subtype: Option<&Subtype>) -> Option<QueryCategory> {
        match subtype? {
            Subtype::Named(name) => match FieldType::from_name(name) {
                FieldType::String => Some(QueryCategory::StringArray),
                FieldType::Number => Some(QueryCategory::NumberArray),
                FieldType::Boolean => Some(QueryCategory::BooleanArray),
                FieldType::Date => Some(QueryCategory::DateArray),
                FieldType::Object | FieldType::CloudedObject | FieldType::Array => {
                    Some(QueryCategory::ObjectArray)
                }
                FieldType::Unknown => None,
            },
            // Structured element types all query as objects
            Subtype::Fields(_) => Some(QueryCategory::ObjectArray),
            Subtype::Other(value) if value.is_object() || value.is_array() => {
                Some(QueryCategory::ObjectArray)
            }
            Subtype::Other(_) => None,
        }
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaFormat;
    use serde_json::json;

    #[test]
    fn test_scalar_fields() {
        assert_eq!(
            QueryCategory::of_field(&FieldDef::optional_string()),
            Some(QueryCategory::String)
        );
        assert_eq!(
            QueryCategory::of_field(&FieldDef::number()),
            Some(QueryCategory::Number)
        );
        assert_eq!(
            QueryCategory::of_field(&FieldDef::boolean()),
            Some(QueryCategory::Boolean)
        );
        assert_eq!(
            QueryCategory::of_field(&FieldDef::date()),
            Some(QueryCategory::Date)
        );
        assert_eq!(
            QueryCategory::of_field(&FieldDef::clouded_object()),
            Some(QueryCategory::Object)
        );
    }

    #[test]
    fn test_array_fields() {
        assert_eq!(
            QueryCategory::of_field(&FieldDef::array_of(FieldType::Number)),
            Some(QueryCategory::NumberArray)
        );
        assert_eq!(
            QueryCategory::of_field(&FieldDef::array_of(FieldType::Date)),
            Some(QueryCategory::DateArray)
        );
        assert_eq!(
            QueryCategory::of_field(&FieldDef::array_of(FieldType::Object)),
            Some(QueryCategory::ObjectArray)
        );
        assert_eq!(
            QueryCategory::of_field(&FieldDef::array_of_objects(SchemaFormat::new())),
            Some(QueryCategory::ObjectArray)
        );
    }

    #[test]
    fn test_unrecognized_fields() {
        let unknown: FieldDef = serde_json::from_value(json!({ "type": "enum" })).unwrap();
        assert_eq!(QueryCategory::of_field(&unknown), None);

        let bad_element: FieldDef =
            serde_json::from_value(json!({ "type": "array", "subtype": "tuple" })).unwrap();
        assert_eq!(QueryCategory::of_field(&bad_element), None);

        let no_element: FieldDef = serde_json::from_value(json!({ "type": "array" })).unwrap();
        assert_eq!(QueryCategory::of_field(&no_element), None);

        let numeric_element: FieldDef =
            serde_json::from_value(json!({ "type": "array", "subtype": 7 })).unwrap();
        assert_eq!(QueryCategory::of_field(&numeric_element), None);
    }

    #[test]
    fn test_choice_list_element_is_object() {
        let moods: FieldDef =
            serde_json::from_value(json!({ "type": "array", "subtype": ["happy", "sad"] }))
                .unwrap();
        assert_eq!(QueryCategory::of_field(&moods), Some(QueryCategory::ObjectArray));
    }

    #[test]
    fn test_nested_object_is_not_a_leaf() {
        assert_eq!(QueryCategory::of_field(&FieldDef::object(SchemaFormat::new())), None);
    }

    #[test]
    fn test_element_categories() {
        assert_eq!(QueryCategory::StringArray.element(), Some(QueryCategory::String));
        assert_eq!(QueryCategory::ObjectArray.element(), Some(QueryCategory::Object));
        assert_eq!(QueryCategory::Number.element(), None);
        assert!(QueryCategory::DateArray.is_array());
        assert!(!QueryCategory::Date.is_array());
    }

    #[test]
    fn test_names_round_trip() {
        for category in QueryCategory::ALL {
            assert_eq!(QueryCategory::from_name(category.as_str()), Some(category));
        }
        assert_eq!(QueryCategory::from_name("tuple"), None);
    }
}
