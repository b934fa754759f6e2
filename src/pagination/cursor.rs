//! Pagination cursor
//!
//! The `(timestamp, id)` pair of the last row on a page. It is the only
//! state a caller carries between page requests.

use serde::Deserialize;
use uuid::Uuid;

use super::errors::{CursorError, CursorResult, PaginationError, PaginationResult};
use crate::query::Row;
use crate::schema::{ColumnKind, TypedValue};
use crate::temporal::{TimestampCodec, ZonedInstant};

/// Resume point for keyset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub timestamp: ZonedInstant,
    pub id: Uuid,
}

/// Wire shape: `{ "timestamp": ISO-8601 UTC instant, "id": UUID }`
#[derive(Debug, Deserialize)]
struct CursorWire {
    timestamp: String,
    id: Uuid,
}

impl Cursor {
    pub fn new(timestamp: ZonedInstant, id: Uuid) -> Self {
        Self { timestamp, id }
    }

    /// Reads the anchor pair out of a fetched row
    pub fn from_row(row: &Row, sort_column: &str, tie_break_column: &str) -> PaginationResult<Self> {
        let timestamp = match key_value(row, sort_column)? {
            TypedValue::DateTimeTz(instant) => *instant,
            other => return Err(unexpected(sort_column, ColumnKind::DateTimeTz, other)),
        };
        let id = match key_value(row, tie_break_column)? {
            TypedValue::Identifier(id) => *id,
            other => return Err(unexpected(tie_break_column, ColumnKind::Identifier, other)),
        };
        Ok(Self { timestamp, id })
    }

    /// Serializes to the JSON wire shape
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.timestamp.to_iso_string(),
            "id": self.id.hyphenated().to_string(),
        })
    }

    /// Parses the JSON wire shape
    pub fn from_json_str(text: &str) -> CursorResult<Self> {
        let wire: CursorWire =
            serde_json::from_str(text).map_err(|e| CursorError::Malformed(e.to_string()))?;
        let timestamp = TimestampCodec::default().decode_text(&wire.timestamp)?;
        Ok(Self {
            timestamp,
            id: wire.id,
        })
    }

    /// Serializes the JSON wire shape to a string
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

fn key_value<'r>(row: &'r Row, column: &str) -> PaginationResult<&'r TypedValue> {
    row.get(column)
        .ok_or_else(|| PaginationError::MissingKeyColumn(column.to_string()))
}

fn unexpected(column: &str, expected: ColumnKind, found: &TypedValue) -> PaginationError {
    PaginationError::UnexpectedKeyKind {
        column: column.to_string(),
        expected: expected.type_name(),
        found: found.kind().type_name(),
    }
}
