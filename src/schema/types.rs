//! Schema type definitions
//!
//! Supported field types:
//! - string, number, boolean, date: scalar leaves
//! - object: nested field map (or an opaque object when no map is given)
//! - cloudedObject: opaque object, never descended into
//! - array: homogeneous list, element type named by `subtype`
//!
//! Unknown type names deserialize successfully and simply never become
//! queryable paths.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of field name to field definition.
pub type SchemaFormat = IndexMap<String, FieldDef>;

/// Declared base type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Object,
    /// Object stored as-is, without a declared inner structure
    CloudedObject,
    Array,
    /// Any type name this crate does not understand
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// Returns the type name as written in schema files
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Object => "object",
            FieldType::CloudedObject => "cloudedObject",
            FieldType::Array => "array",
            FieldType::Unknown => "unknown",
        }
    }

    /// Parses a type name as it appears in an array `subtype`
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "object" => FieldType::Object,
            "cloudedObject" => FieldType::CloudedObject,
            "array" => FieldType::Array,
            _ => FieldType::Unknown,
        }
    }
}

/// Subtype of a field: an element type name, a nested field map, or
/// anything else the schema author put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subtype {
    /// Element type name, e.g. `"number"` for an array of numbers
    Named(String),
    /// Nested field definitions
    Fields(SchemaFormat),
    /// Unrecognized shape (enum choice lists and the like)
    Other(serde_json::Value),
}

/// A single field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Element type (arrays) or nested fields (objects)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,
    /// Whether the field must be present in stored documents
    #[serde(default)]
    pub required: bool,
}

impl FieldDef {
    fn scalar(field_type: FieldType, required: bool) -> Self {
        Self {
            field_type,
            subtype: None,
            required,
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::scalar(FieldType::String, true)
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self::scalar(FieldType::String, false)
    }

    /// Create an optional number field
    pub fn number() -> Self {
        Self::scalar(FieldType::Number, false)
    }

    /// Create an optional boolean field
    pub fn boolean() -> Self {
        Self::scalar(FieldType::Boolean, false)
    }

    /// Create an optional date field
    pub fn date() -> Self {
        Self::scalar(FieldType::Date, false)
    }

    /// Create an opaque object field
    pub fn clouded_object() -> Self {
        Self::scalar(FieldType::CloudedObject, false)
    }

    /// Create an object field with nested fields
    pub fn object(fields: SchemaFormat) -> Self {
        Self {
            field_type: FieldType::Object,
            subtype: Some(Subtype::Fields(fields)),
            required: false,
        }
    }

    /// Create an array field whose elements are of the named type
    pub fn array_of(element: FieldType) -> Self {
        Self {
            field_type: FieldType::Array,
            subtype: Some(Subtype::Named(element.type_name().to_string())),
            required: false,
        }
    }

    /// Create an array field whose elements are structured objects
    pub fn array_of_objects(fields: SchemaFormat) -> Self {
        Self {
            field_type: FieldType::Array,
            subtype: Some(Subtype::Fields(fields)),
            required: false,
        }
    }

    /// Returns the nested field map, if the subtype is one
    pub fn nested_fields(&self) -> Option<&SchemaFormat> {
        match &self.subtype {
            Some(Subtype::Fields(fields)) => Some(fields),
            _ => None,
        }
    }
}

/// A named schema as handed over by the schema store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Stable identifier used for lookups
    pub identifier: String,
    /// Collection name
    pub name: String,
    /// Field definitions
    pub format: SchemaFormat,
}

impl Schema {
    /// Create a new schema
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, format: SchemaFormat) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            format,
        }
    }

    /// Adds the document key field `_id` as a required string, unless the
    /// schema already declares one.
    pub fn ensure_id_field(&mut self) {
        if !self.format.contains_key("_id") {
            self.format
                .insert("_id".to_string(), FieldDef::required_string());
        }
    }

    /// Builder form of [`Schema::ensure_id_field`]
    pub fn with_id_field(mut self) -> Self {
        self.ensure_id_field();
        self
    }
}
