//! Pagination errors

use thiserror::Error;

use crate::query::QueryError;
use crate::temporal::TimestampError;

/// Result type for pagination
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for continuation token handling
pub type CursorResult<T> = Result<T, CursorError>;

/// Pagination errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaginationError {
    /// Page size outside `1..=max`
    #[error("Invalid page size {size}: must be between 1 and {max}")]
    InvalidPageSize { size: usize, max: usize },

    /// A key column is missing from the schema or has the wrong kind
    #[error("Invalid key column '{column}': {reason}")]
    InvalidKeyColumn { column: String, reason: String },

    /// A fetched row lacks a key column
    #[error("Row is missing key column '{0}'")]
    MissingKeyColumn(String),

    /// A fetched row holds a key value of the wrong kind
    #[error("Key column '{column}' holds a {found} value, expected {expected}")]
    UnexpectedKeyKind {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Storage engine failure, surfaced as-is
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Continuation token errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CursorError {
    /// Token is not valid base64url JSON of the cursor wire shape
    #[error("Malformed continuation token: {0}")]
    Malformed(String),

    /// Token was expected to carry a signature
    #[error("Continuation token is not signed")]
    MissingSignature,

    /// Signature does not match the payload
    #[error("Continuation token signature mismatch")]
    InvalidSignature,

    /// Cursor timestamp is not an ISO-8601 instant
    #[error("Invalid cursor timestamp: {0}")]
    Timestamp(#[from] TimestampError),
}
