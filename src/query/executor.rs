//! Storage engine seam
//!
//! The engine that actually runs a [`Query`] is an external collaborator.
//! This crate builds queries and consumes rows; it issues at most one
//! `execute` call per compile-and-fetch cycle and never retries.

use super::ast::Query;
use super::errors::QueryResult;
use super::row::Row;

/// Executes a query and returns rows honoring its predicates, ordering
/// and limit.
pub trait QueryExecutor {
    fn execute(&self, query: &Query) -> QueryResult<Vec<Row>>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    fn execute(&self, query: &Query) -> QueryResult<Vec<Row>> {
        (**self).execute(query)
    }
}
