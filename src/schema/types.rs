//! Column kinds and table schemas
//!
//! Supported kinds:
//! - integer64: 64-bit signed integer
//! - float64: 64-bit floating point
//! - text: UTF-8 string
//! - identifier: UUID
//! - date: calendar date, no zone
//! - date_time: local date-time, no zone
//! - date_time_tz: timezone-aware instant, stored UTC
//! - boolean: flag, equality only

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::value::TypedValue;
use crate::temporal::{calendar, TimestampCodec, TimestampError};

/// Closed set of column kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[serde(alias = "bigint", alias = "long")]
    Integer64,
    #[serde(alias = "double")]
    Float64,
    #[serde(alias = "varchar")]
    Text,
    #[serde(alias = "uuid")]
    Identifier,
    Date,
    #[serde(alias = "datetime")]
    DateTime,
    #[serde(alias = "datetimetz", alias = "timestamptz")]
    DateTimeTz,
    #[serde(alias = "bool")]
    Boolean,
}

impl ColumnKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnKind::Integer64 => "integer64",
            ColumnKind::Float64 => "float64",
            ColumnKind::Text => "text",
            ColumnKind::Identifier => "identifier",
            ColumnKind::Date => "date",
            ColumnKind::DateTime => "date_time",
            ColumnKind::DateTimeTz => "date_time_tz",
            ColumnKind::Boolean => "boolean",
        }
    }

    /// Returns true if values of this kind have a total order
    pub fn is_ordered(&self) -> bool {
        !matches!(self, ColumnKind::Boolean)
    }

    /// Parses one untyped input element into a value of this kind.
    ///
    /// Text is passed through untouched; every other kind ignores
    /// surrounding whitespace.
    pub fn parse(&self, raw: &str, codec: &TimestampCodec) -> Result<TypedValue, String> {
        let trimmed = raw.trim();
        match self {
            ColumnKind::Text => Ok(TypedValue::Text(raw.to_string())),
            ColumnKind::Integer64 => trimmed
                .parse::<i64>()
                .map(TypedValue::Integer64)
                .map_err(|e| e.to_string()),
            ColumnKind::Float64 => {
                let value = trimmed.parse::<f64>().map_err(|e| e.to_string())?;
                if !value.is_finite() {
                    return Err(format!("'{}' is not a finite number", trimmed));
                }
                Ok(TypedValue::Float64(value))
            }
            ColumnKind::Identifier => uuid::Uuid::parse_str(trimmed)
                .map(TypedValue::Identifier)
                .map_err(|e| e.to_string()),
            ColumnKind::Date => calendar::parse_date(trimmed)
                .map(TypedValue::Date)
                .map_err(|e| e.to_string()),
            ColumnKind::DateTime => calendar::parse_date_time(trimmed)
                .map(TypedValue::DateTime)
                .map_err(|e| e.to_string()),
            ColumnKind::DateTimeTz => codec
                .decode_text(trimmed)
                .map(TypedValue::DateTimeTz)
                .map_err(|e: TimestampError| e.to_string()),
            ColumnKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Ok(TypedValue::Boolean(true)),
                "false" => Ok(TypedValue::Boolean(false)),
                other => Err(format!("'{}' is not a boolean", other)),
            },
        }
    }
}

/// A named, typed column. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, matched case-sensitively
    pub name: String,
    /// Column kind
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    /// Create a column descriptor
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Table schema: table name plus ordered column list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub table: String,
    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Create a new schema
    pub fn new(table: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// The built-in `user` table: `id`, `name`, `created_at`
    pub fn users() -> Self {
        Self::new(
            "user",
            vec![
                ColumnDescriptor::new("id", ColumnKind::Identifier),
                ColumnDescriptor::new("name", ColumnKind::Text),
                ColumnDescriptor::new("created_at", ColumnKind::DateTimeTz),
            ],
        )
    }

    /// Validates the schema structure itself
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.table.trim().is_empty() {
            return Err("table name must not be empty".into());
        }

        if self.columns.is_empty() {
            return Err(format!("table '{}' declares no columns", self.table));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.trim().is_empty() {
                return Err("column name must not be empty".into());
            }
            if !seen.insert(column.name.as_str()) {
                return Err(format!("column '{}' is declared more than once", column.name));
            }
        }

        Ok(())
    }
}
