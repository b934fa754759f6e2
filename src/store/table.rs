//! In-memory table
//!
//! Holds typed rows for one registry and answers queries the way a SQL
//! engine would. Rows are validated against the registry on the way in.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::evaluator::PredicateEvaluator;
use super::sorter::RowSorter;
use crate::query::{Query, QueryError, QueryExecutor, QueryResult, Row};
use crate::schema::{ColumnRegistry, TypedValue};
use crate::temporal::TimestampCodec;

/// One table of typed rows
#[derive(Debug, Clone)]
pub struct MemoryTable {
    registry: ColumnRegistry,
    codec: TimestampCodec,
    rows: Vec<Row>,
}

impl MemoryTable {
    /// Creates an empty table using the default timestamp codec
    pub fn new(registry: ColumnRegistry) -> Self {
        Self::with_codec(registry, TimestampCodec::default())
    }

    /// Creates an empty table with an explicit timestamp codec
    pub fn with_codec(registry: ColumnRegistry, codec: TimestampCodec) -> Self {
        Self {
            registry,
            codec,
            rows: Vec::new(),
        }
    }

    /// Reads rows from a JSON array of objects.
    ///
    /// `null` values are treated as absent.
    pub fn from_json(
        registry: ColumnRegistry,
        data: &Value,
        codec: TimestampCodec,
    ) -> StoreResult<Self> {
        let items = data
            .as_array()
            .ok_or_else(|| StoreError::MalformedData("expected a JSON array of rows".into()))?;

        let mut table = Self::with_codec(registry, codec);
        for (index, item) in items.iter().enumerate() {
            let object = item.as_object().ok_or_else(|| {
                StoreError::MalformedData(format!("row {} is not a JSON object", index))
            })?;

            let mut row = Row::new();
            for (column, value) in object {
                if value.is_null() {
                    continue;
                }
                let descriptor =
                    table
                        .registry
                        .lookup(column)
                        .ok_or_else(|| StoreError::UnknownColumn {
                            table: table.registry.table().to_string(),
                            column: column.clone(),
                        })?;
                let typed = TypedValue::from_json(descriptor.kind, value, &table.codec).map_err(
                    |reason| StoreError::InvalidValue {
                        row: index,
                        column: column.clone(),
                        reason,
                    },
                )?;
                row.insert(column.clone(), typed);
            }
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Loads rows from a JSON data file
    pub fn load_file(path: &Path, registry: ColumnRegistry, codec: TimestampCodec) -> StoreResult<Self> {
        let content = fs::read_to_string(path)?;
        let data: Value = serde_json::from_str(&content)
            .map_err(|e| StoreError::MalformedData(format!("{}: {}", path.display(), e)))?;
        Self::from_json(registry, &data, codec)
    }

    /// Writes rows as a JSON array
    pub fn save_file(&self, path: &Path) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&self.to_json())
            .map_err(|e| StoreError::MalformedData(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Inserts a row after checking every value against the registry
    pub fn insert(&mut self, row: Row) -> StoreResult<()> {
        for (column, value) in row.iter() {
            let descriptor = self
                .registry
                .lookup(column)
                .ok_or_else(|| StoreError::UnknownColumn {
                    table: self.registry.table().to_string(),
                    column: column.to_string(),
                })?;
            if descriptor.kind != value.kind() {
                return Err(StoreError::KindMismatch {
                    column: column.to_string(),
                    expected: descriptor.kind.type_name(),
                    found: value.kind().type_name(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Converts all rows to a JSON array
    pub fn to_json(&self) -> Value {
        Value::Array(self.rows.iter().map(|r| r.to_json(&self.codec)).collect())
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn codec(&self) -> &TimestampCodec {
        &self.codec
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_columns(&self, query: &Query) -> QueryResult<()> {
        let predicate_columns = query.predicates.iter().flat_map(|p| p.columns());
        let order_columns = query.order.iter().map(|s| s.column.as_str());

        for column in predicate_columns.chain(order_columns) {
            if self.registry.lookup(column).is_none() {
                return Err(QueryError::UnknownColumn(column.to_string()));
            }
        }
        Ok(())
    }
}

impl QueryExecutor for MemoryTable {
    fn execute(&self, query: &Query) -> QueryResult<Vec<Row>> {
        if query.table != self.registry.table() {
            return Err(QueryError::UnknownTable(query.table.clone()));
        }
        self.check_columns(query)?;

        let evaluator = PredicateEvaluator::new(&self.codec);
        let mut rows: Vec<Row> = self
            .rows
            .iter()
            .filter(|row| evaluator.matches(row, &query.predicates))
            .cloned()
            .collect();

        RowSorter::sort(&mut rows, &query.order);

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }
}
