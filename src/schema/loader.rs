//! Schema loader for loading schemas from disk at startup
//!
//! - Schemas are read from `*.json` files in one directory
//! - A file holds either a single schema or a list of schemas
//! - Files are loaded in file-name order so registration is deterministic
//! - Identifiers are unique across the whole directory

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Schema, SchemaFormat};
use crate::query::SchemaProvider;

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaFile {
    Many(Vec<Schema>),
    One(Schema),
}

/// Schema loader that reads schema files from disk and maintains an
/// in-memory registry keyed by identifier.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas in registration order
    schemas: IndexMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates a new schema loader for the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: IndexMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads all schema files from the schema directory.
    ///
    /// A missing directory is an error; an empty one is not.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in paths {
            self.load_schema_file(&path)?;
        }

        tracing::debug!(
            dir = %self.schema_dir.display(),
            count = self.schemas.len(),
            "schemas loaded"
        );
        Ok(())
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let file: SchemaFile = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        let schemas = match file {
            SchemaFile::Many(list) => list,
            SchemaFile::One(schema) => vec![schema],
        };

        for schema in schemas {
            self.register(schema)?;
        }
        Ok(())
    }

    /// Registers a schema directly (for testing or programmatic creation).
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        if self.schemas.contains_key(&schema.identifier) {
            return Err(SchemaError::DuplicateSchema(schema.identifier));
        }

        tracing::trace!(schema = %schema.identifier, name = %schema.name, "schema registered");
        self.schemas.insert(schema.identifier.clone(), schema);
        Ok(())
    }

    /// Keeps only the schemas whose identifier is listed.
    ///
    /// Identifiers with no loaded schema are skipped.
    pub fn retain_identifiers(&mut self, identifiers: &[String]) {
        self.schemas
            .retain(|identifier, _| identifiers.iter().any(|wanted| wanted == identifier));
    }

    /// Injects the `_id` field into every loaded schema.
    pub fn add_id_fields(&mut self) {
        for schema in self.schemas.values_mut() {
            schema.ensure_id_field();
        }
    }

    /// Gets a schema by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Schema> {
        self.schemas.get(identifier)
    }

    /// Checks if a schema exists.
    pub fn exists(&self, identifier: &str) -> bool {
        self.schemas.contains_key(identifier)
    }

    /// Returns all loaded schemas in registration order.
    pub fn all_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl SchemaProvider for SchemaLoader {
    fn schema_format(&self, identifier: &str) -> SchemaResult<&SchemaFormat> {
        self.get(identifier)
            .map(|schema| &schema.format)
            .ok_or_else(|| SchemaError::UnknownSchema(identifier.to_string()))
    }
}
