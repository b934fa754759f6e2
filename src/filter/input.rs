//! Loosely-typed filter input

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Filter operators; names are case-sensitive on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Equals
    Eq,
    /// Substring containment
    Contains,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Value in comma-separated list
    In,
}

impl Operator {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Contains => "CONTAINS",
            Operator::Lt => "LT",
            Operator::Le => "LE",
            Operator::Gt => "GT",
            Operator::Ge => "GE",
            Operator::In => "IN",
        }
    }

    /// Returns true for `LT`, `LE`, `GT` and `GE`
    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EQ" => Ok(Operator::Eq),
            "CONTAINS" => Ok(Operator::Contains),
            "LT" => Ok(Operator::Lt),
            "LE" => Ok(Operator::Le),
            "GT" => Ok(Operator::Gt),
            "GE" => Ok(Operator::Ge),
            "IN" => Ok(Operator::In),
            other => Err(format!("unknown operator '{}'", other)),
        }
    }
}

/// One `(field, rawValue, operator)` triple from a request.
///
/// `raw_value` may hold several comma-separated values; only `IN` uses
/// more than the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInput {
    /// Column name, matched case-sensitively
    pub field: String,

    /// Untyped value text
    #[serde(rename = "value")]
    pub raw_value: String,

    /// Operator
    #[serde(rename = "op", alias = "operator")]
    pub operator: Operator,
}

impl FilterInput {
    pub fn new(field: impl Into<String>, raw_value: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            raw_value: raw_value.into(),
            operator,
        }
    }

    /// True when the value is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.raw_value.trim().is_empty()
    }
}
