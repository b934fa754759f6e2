//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit. Request errors
//! (bad filters, bad cursors) are also written to stdout as an error
//! response before exiting.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::filter::FilterError;
use crate::pagination::{CursorError, PaginationError};
use crate::schema::SchemaError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Schema file error
    SchemaError,
    /// Rows file error
    DataError,
    /// Output file already exists
    AlreadyExists,
    /// Request is not valid JSON of the expected shape
    InvalidRequest,
    /// A filter rejected the request
    FilterRejected,
    /// Continuation token could not be used
    InvalidCursor,
    /// Pagination failed
    PaginationFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SEEKQL_CLI_CONFIG_ERROR",
            Self::IoError => "SEEKQL_CLI_IO_ERROR",
            Self::SchemaError => "SEEKQL_CLI_SCHEMA_ERROR",
            Self::DataError => "SEEKQL_CLI_DATA_ERROR",
            Self::AlreadyExists => "SEEKQL_CLI_ALREADY_EXISTS",
            Self::InvalidRequest => "SEEKQL_CLI_INVALID_REQUEST",
            Self::FilterRejected => "SEEKQL_CLI_FILTER_REJECTED",
            Self::InvalidCursor => "SEEKQL_CLI_INVALID_CURSOR",
            Self::PaginationFailed => "SEEKQL_CLI_PAGINATION_FAILED",
        }
    }

    /// Returns true for errors caused by the request rather than the setup
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest | Self::FilterRejected | Self::InvalidCursor
        )
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Output file already exists
    pub fn already_exists(path: impl fmt::Display) -> Self {
        Self::new(
            CliErrorCode::AlreadyExists,
            format!("{} already exists; refusing to overwrite", path),
        )
    }

    /// Malformed request
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRequest, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::DataError, e.to_string())
    }
}

impl From<FilterError> for CliError {
    fn from(e: FilterError) -> Self {
        Self::new(CliErrorCode::FilterRejected, e.to_string())
    }
}

impl From<CursorError> for CliError {
    fn from(e: CursorError) -> Self {
        Self::new(CliErrorCode::InvalidCursor, e.to_string())
    }
}

impl From<PaginationError> for CliError {
    fn from(e: PaginationError) -> Self {
        Self::new(CliErrorCode::PaginationFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
