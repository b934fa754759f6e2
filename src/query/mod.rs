//! Query model and storage engine interface
//!
//! - [`Query`] / [`Predicate`]: what the filter compiler and paginator build
//! - [`QueryExecutor`]: the seam to whichever engine runs the query
//! - [`SqlRenderer`]: parameterised SQL for engines that speak SQL

mod ast;
mod errors;
mod executor;
mod row;
mod sql;

pub use ast::{CompareOp, ContainsTarget, Predicate, Query, SortDirection, SortSpec};
pub use errors::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use row::Row;
pub use sql::{like_pattern, SqlRenderer, SqlStatement};
