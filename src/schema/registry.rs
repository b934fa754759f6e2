//! Column type registry
//!
//! Built once from a table schema and read-only afterwards. Lookups take
//! `&self` only, so a registry can be shared across threads without locks.

use std::collections::HashMap;

use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnDescriptor, TableSchema};

/// Name-to-descriptor mapping for one table
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    table: String,
    columns: Vec<ColumnDescriptor>,
    by_name: HashMap<String, usize>,
}

impl ColumnRegistry {
    /// Builds the registry from a schema definition
    pub fn from_schema(schema: &TableSchema) -> SchemaResult<Self> {
        let mut by_name = HashMap::with_capacity(schema.columns.len());
        for (index, column) in schema.columns.iter().enumerate() {
            if by_name.insert(column.name.clone(), index).is_some() {
                return Err(SchemaError::duplicate_column(&column.name));
            }
        }

        schema
            .validate_structure()
            .map_err(|reason| SchemaError::malformed_schema(schema.table.clone(), reason))?;

        Ok(Self {
            table: schema.table.clone(),
            columns: schema.columns.clone(),
            by_name,
        })
    }

    /// Resolves a column by exact, case-sensitive name
    pub fn lookup(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.by_name.get(name).map(|&index| &self.columns[index])
    }

    /// Returns the table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns columns in declaration order
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Returns the number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the registry has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnKind, SchemaErrorCode};

    #[test]
    fn test_lookup_users() {
        let registry = ColumnRegistry::from_schema(&TableSchema::users()).unwrap();

        assert_eq!(registry.table(), "user");
        assert_eq!(registry.lookup("created_at").unwrap().kind, ColumnKind::DateTimeTz);
        assert_eq!(registry.lookup("id").unwrap().kind, ColumnKind::Identifier);
        assert!(registry.lookup("bogus_field").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = ColumnRegistry::from_schema(&TableSchema::users()).unwrap();
        assert!(registry.lookup("Name").is_none());
        assert!(registry.lookup("name").is_some());
    }

    #[test]
    fn test_declaration_order_kept() {
        let registry = ColumnRegistry::from_schema(&TableSchema::users()).unwrap();
        let names: Vec<_> = registry.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "created_at"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let schema = TableSchema::new(
            "t",
            vec![
                ColumnDescriptor::new("a", ColumnKind::Text),
                ColumnDescriptor::new("a", ColumnKind::Integer64),
            ],
        );
        let err = ColumnRegistry::from_schema(&schema).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::DuplicateColumn);
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ColumnRegistry>();
    }
}
