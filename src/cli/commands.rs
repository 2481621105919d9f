//! CLI command implementations
//!
//! Configuration failures abort the command with a non-zero exit. Anything
//! that goes wrong with the request itself (bad JSON, unknown schema,
//! rejected query) is reported as an error response on stdout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::executor::{FindOptions, MemoryCollection, SortSpec, DEFAULT_LIMIT};
use crate::query::{self, QueryCategory, QueryCompiler};
use crate::schema::SchemaLoader;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of schema files (required); relative paths resolve
    /// against the configuration file's directory
    pub schema_dir: PathBuf,

    /// Schemas to expose (optional, default all loaded schemas)
    #[serde(default)]
    pub used_schemas: Option<Vec<String>>,

    /// Page size for `find` when no limit is given (optional, default 100)
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Inject an `_id` string field into every schema (optional, default true)
    #[serde(default = "default_add_id_field")]
    pub add_id_field: bool,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_add_id_field() -> bool {
    true
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        if config.schema_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.schema_dir = base.join(&config.schema_dir);
            }
        }

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.as_os_str().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }

        if self.default_limit == 0 {
            return Err(CliError::config_error("default_limit must be > 0"));
        }

        if let Some(used) = &self.used_schemas {
            if used.iter().any(|id| id.trim().is_empty()) {
                return Err(CliError::config_error(
                    "used_schemas must not contain empty identifiers",
                ));
            }
        }

        Ok(())
    }

    /// Loads the schemas this configuration exposes
    pub fn load_schemas(&self) -> CliResult<SchemaLoader> {
        let mut loader = SchemaLoader::new(&self.schema_dir);
        loader
            .load_all()
            .map_err(|e| CliError::config_error(format!("Failed to load schemas: {}", e)))?;

        if let Some(used) = &self.used_schemas {
            loader.retain_identifiers(used);
        }
        if self.add_id_field {
            loader.add_id_fields();
        }

        tracing::debug!(
            schema_dir = %loader.schema_dir().display(),
            schemas = loader.schema_count(),
            "schemas ready"
        );
        Ok(loader)
    }
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Compile { config, schema } => compile(&config, &schema),
        Command::Find {
            config,
            schema,
            data,
            limit,
            offset,
            sort,
            descending,
        } => {
            let sort = sort.map(|field| {
                if descending {
                    SortSpec::desc(field)
                } else {
                    SortSpec::asc(field)
                }
            });
            let options = FindOptions {
                sort,
                limit,
                offset,
            };
            find(&config, &schema, &data, options)
        }
        Command::Operators { category } => respond(operator_table(&category)),
        Command::Paths { config, schema } => {
            let loader = Config::load(&config)?.load_schemas()?;
            respond(schema_paths(&loader, &schema))
        }
    }
}

/// Compile a query read from stdin and print the filter
pub fn compile(config_path: &Path, schema: &str) -> CliResult<()> {
    let loader = Config::load(config_path)?.load_schemas()?;
    respond(read_request().and_then(|query| compile_query(&loader, schema, &query)))
}

/// Compile a query read from stdin and print the matching documents
pub fn find(config_path: &Path, schema: &str, data: &Path, options: FindOptions) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let loader = config.load_schemas()?;

    let result = read_request().and_then(|query| {
        let collection = load_collection(data)?.with_default_limit(config.default_limit);
        find_documents(&loader, schema, &query, &collection, &options)
    });
    respond(result)
}

/// Compiles `query` against the identified schema
pub fn compile_query(loader: &SchemaLoader, schema: &str, query: &Value) -> CliResult<Value> {
    let compiler = QueryCompiler::new(loader, schema)?;
    Ok(compiler.compile(query)?.to_document())
}

/// Compiles `query` and runs it over `collection`
pub fn find_documents(
    loader: &SchemaLoader,
    schema: &str,
    query: &Value,
    collection: &MemoryCollection,
    options: &FindOptions,
) -> CliResult<Value> {
    let compiler = QueryCompiler::new(loader, schema)?;
    let filter = compiler.compile(query)?;
    let result = collection.find(&filter, options)?;
    Ok(serde_json::to_value(result)?)
}

/// Renders the operator table of a category, placeholders shown as `"<kind>"`
pub fn operator_table(category: &str) -> CliResult<Value> {
    let category = QueryCategory::from_name(category).ok_or_else(|| {
        CliError::invalid_argument(format!("Unknown query category '{}'", category))
    })?;

    let operators: Map<String, Value> = query::table(category)
        .map(|(op, template)| (op.as_str().to_string(), template.render()))
        .collect();
    Ok(Value::Object(operators))
}

/// Lists the queryable paths of a schema with their categories
pub fn schema_paths(loader: &SchemaLoader, schema: &str) -> CliResult<Value> {
    let compiler = QueryCompiler::new(loader, schema)?;
    let paths: Map<String, Value> = compiler
        .type_map()
        .iter()
        .map(|(path, category)| (path.to_string(), Value::String(category.as_str().to_string())))
        .collect();
    Ok(Value::Object(paths))
}

fn load_collection(path: &Path) -> CliResult<MemoryCollection> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read data file {}: {}", path.display(), e))
    })?;
    let documents: Value = serde_json::from_str(&content)?;
    Ok(MemoryCollection::from_json(documents)?)
}

fn respond(result: CliResult<Value>) -> CliResult<()> {
    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            tracing::warn!(code = e.code(), error = %e, "request failed");
            write_error(e.code(), &e.message())
        }
    }
}
