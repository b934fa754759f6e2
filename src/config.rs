//! Configuration file
//!
//! A single JSON object. Only `data_path` is needed to run queries; every
//! other field has a default.
//!
//! ```json
//! { "data_path": "./users.json",
//!   "schema_path": "./user.schema.json",
//!   "sort_column": "created_at",
//!   "tie_break_column": "id",
//!   "page_size": 20,
//!   "dialect": "postgres",
//!   "log_level": "warn",
//!   "cursor_secret": "change-me" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialect::Dialect;
use crate::observability::Severity;
use crate::pagination::{CursorCodec, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::schema::{ColumnRegistry, SchemaLoader, SchemaResult, TableSchema};
use crate::temporal::TimestampCodec;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid config object
    #[error("Invalid config JSON: {0}")]
    Parse(String),

    /// A field holds an unusable value
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Rows file for the in-memory store
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Table schema file; the built-in `user` table when absent
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Primary keyset column, a zoned timestamp (default "created_at")
    #[serde(default = "default_sort_column")]
    pub sort_column: String,

    /// Unique tie-break column, an identifier (default "id")
    #[serde(default = "default_tie_break_column")]
    pub tie_break_column: String,

    /// Rows per page (default 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Storage dialect (default "postgres")
    #[serde(default)]
    pub dialect: Dialect,

    /// Minimum log severity (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Signs continuation tokens when set
    #[serde(default)]
    pub cursor_secret: Option<String>,
}

fn default_sort_column() -> String {
    "created_at".to_string()
}

fn default_tie_break_column() -> String {
    "id".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            schema_path: None,
            sort_column: default_sort_column(),
            tie_break_column: default_tie_break_column(),
            page_size: default_page_size(),
            dialect: Dialect::default(),
            log_level: default_log_level(),
            cursor_secret: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::parse(&content)?;

        // Relative paths resolve against the config file's directory.
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_paths(base))
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        if self.sort_column.is_empty() || self.tie_break_column.is_empty() {
            return Err(ConfigError::Invalid("key column names must not be empty".into()));
        }
        if self.sort_column == self.tie_break_column {
            return Err(ConfigError::Invalid(
                "sort_column and tie_break_column must differ".into(),
            ));
        }

        self.log_severity()?;

        if let Some(secret) = &self.cursor_secret {
            if secret.is_empty() {
                return Err(ConfigError::Invalid("cursor_secret must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn log_severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse::<Severity>().map_err(ConfigError::Invalid)
    }

    /// Rows file, required by commands that read data
    pub fn require_data_path(&self) -> ConfigResult<&Path> {
        self.data_path
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid("data_path is required".into()))
    }

    /// Loads the configured schema, or the built-in `user` table
    pub fn load_registry(&self) -> SchemaResult<ColumnRegistry> {
        match &self.schema_path {
            Some(path) => SchemaLoader::load_registry(path),
            None => ColumnRegistry::from_schema(&TableSchema::users()),
        }
    }

    /// Timestamp codec for the configured dialect
    pub fn timestamp_codec(&self) -> TimestampCodec {
        TimestampCodec::new(self.dialect)
    }

    /// Continuation token codec, signed when a secret is configured
    pub fn cursor_codec(&self) -> CursorCodec {
        match &self.cursor_secret {
            Some(secret) => CursorCodec::with_secret(secret.as_bytes()),
            None => CursorCodec::new(),
        }
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        self.data_path = self.data_path.map(|p| resolve(base, p));
        self.schema_path = self.schema_path.map(|p| resolve(base, p));
        self
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
