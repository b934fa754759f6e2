//! Temporal parsing errors

use thiserror::Error;

use crate::dialect::Dialect;

/// Result type for temporal operations
pub type TimestampResult<T> = Result<T, TimestampError>;

/// Temporal parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Input matched none of the accepted zoned timestamp forms
    #[error("Malformed timestamp '{text}' (dialect: {dialect})")]
    MalformedTimestamp { text: String, dialect: Dialect },

    /// Input is not an ISO `yyyy-MM-dd` date
    #[error("Malformed date '{0}'")]
    MalformedDate(String),

    /// Input is not an ISO `yyyy-MM-ddTHH:mm:ss[.fraction]` date-time
    #[error("Malformed date-time '{0}'")]
    MalformedDateTime(String),
}

impl TimestampError {
    /// Create a malformed timestamp error carrying the original text
    pub fn malformed(text: impl Into<String>, dialect: Dialect) -> Self {
        TimestampError::MalformedTimestamp {
            text: text.into(),
            dialect,
        }
    }
}
