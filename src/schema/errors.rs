//! Schema error types
//!
//! Error codes:
//! - SEEKQL_MALFORMED_SCHEMA
//! - SEEKQL_DUPLICATE_COLUMN
//! - SEEKQL_INVALID_COLUMN_VALUE
//!
//! Schema errors are raised while building the registry or loading rows,
//! never during filter compilation.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema file unreadable or structurally invalid
    MalformedSchema,
    /// Two columns share a name
    DuplicateColumn,
    /// A stored value does not fit its column kind
    InvalidColumnValue,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::MalformedSchema => "SEEKQL_MALFORMED_SCHEMA",
            SchemaErrorCode::DuplicateColumn => "SEEKQL_DUPLICATE_COLUMN",
            SchemaErrorCode::InvalidColumnValue => "SEEKQL_INVALID_COLUMN_VALUE",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    column: Option<String>,
}

impl SchemaError {
    /// Create an error for a malformed schema source
    pub fn malformed_schema(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
            column: None,
        }
    }

    /// Create a duplicate column error
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            code: SchemaErrorCode::DuplicateColumn,
            message: format!("Column '{}' is declared more than once", column),
            column: Some(column),
        }
    }

    /// Create an invalid stored value error
    pub fn invalid_column_value(column: impl Into<String>, reason: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            code: SchemaErrorCode::InvalidColumnValue,
            message: format!("Invalid value for column '{}': {}", column, reason.into()),
            column: Some(column),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the column if applicable
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
