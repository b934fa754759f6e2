//! Schema loader for table schema files
//!
//! A schema file is a single JSON object:
//!
//! ```json
//! { "table": "user",
//!   "columns": [ { "name": "id", "kind": "identifier" },
//!                { "name": "created_at", "kind": "date_time_tz" } ] }
//! ```
//!
//! Unknown kinds, duplicate columns and empty tables fail the load.

use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::registry::ColumnRegistry;
use super::types::TableSchema;

/// Reads and writes table schema files
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads and validates a schema file
    pub fn load_file(path: &Path) -> SchemaResult<TableSchema> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Loads a schema file straight into a registry
    pub fn load_registry(path: &Path) -> SchemaResult<ColumnRegistry> {
        ColumnRegistry::from_schema(&Self::load_file(path)?)
    }

    /// Parses schema JSON; `source` names the input in errors
    pub fn parse(content: &str, source: &str) -> SchemaResult<TableSchema> {
        let schema: TableSchema = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed_schema(source, format!("Invalid JSON: {}", e)))?;

        // Duplicate names get their own code.
        ColumnRegistry::from_schema(&schema)?;

        Ok(schema)
    }

    /// Writes a schema file, refusing to overwrite an existing one
    pub fn save_file(path: &Path, schema: &TableSchema) -> SchemaResult<()> {
        if path.exists() {
            return Err(SchemaError::malformed_schema(
                path.display().to_string(),
                "file already exists",
            ));
        }

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(path, content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })
    }
}
