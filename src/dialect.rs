//! Storage dialects
//!
//! The storage engine is an external collaborator; the dialect only affects
//! placeholder syntax in rendered SQL and the context carried by codec errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported storage dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL: `$1, $2, ...` placeholders
    #[default]
    Postgres,
    /// H2: positional `?` placeholders
    H2,
}

impl Dialect {
    /// Returns the dialect name
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::H2 => "h2",
        }
    }

    /// Returns the bind placeholder for the 1-based parameter `index`
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", index),
            Dialect::H2 => "?".to_string(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "h2" => Ok(Dialect::H2),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}
