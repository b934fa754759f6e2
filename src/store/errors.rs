//! In-memory store errors

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// In-memory store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Row carries a column the table does not declare
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// Row value kind differs from the column kind
    #[error("Column '{column}' expects {expected}, got {found}")]
    KindMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Stored JSON value cannot be read as the column kind
    #[error("Invalid value for column '{column}' in row {row}: {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        reason: String,
    },

    /// Data file is not a JSON array of objects
    #[error("Malformed data file: {0}")]
    MalformedData(String),

    /// Data file could not be read or written
    #[error("Data file I/O failed: {0}")]
    Io(#[from] io::Error),
}
