//! Result rows

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::schema::TypedValue;
use crate::temporal::TimestampCodec;

/// One result row: column name to typed value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: BTreeMap<String, TypedValue>,
}

impl Row {
    /// Creates an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: TypedValue) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    /// Sets a column value
    pub fn insert(&mut self, column: impl Into<String>, value: TypedValue) {
        self.values.insert(column.into(), value);
    }

    /// Returns a column value
    pub fn get(&self, column: &str) -> Option<&TypedValue> {
        self.values.get(column)
    }

    /// Iterates columns in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts to a JSON object
    pub fn to_json(&self, codec: &TimestampCodec) -> Value {
        let mut map = Map::new();
        for (column, value) in &self.values {
            map.insert(column.clone(), value.to_json(codec));
        }
        Value::Object(map)
    }
}
