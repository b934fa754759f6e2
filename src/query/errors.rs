//! Query execution errors
//!
//! Returned by [`QueryExecutor`](super::QueryExecutor) implementations.
//! Retry policy, if any, belongs to the executor, never to callers here.

use thiserror::Error;

/// Result type for query execution
pub type QueryResult<T> = Result<T, QueryError>;

/// Query execution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Query targets a table the executor does not hold
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Predicate or ordering references a column the table does not have
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Storage engine failure
    #[error("Execution failed: {0}")]
    Execution(String),
}
