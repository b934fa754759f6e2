//! In-memory storage engine
//!
//! A reference [`QueryExecutor`](crate::query::QueryExecutor) over typed
//! rows held in memory. Used by tests and the CLI; not a production engine.

mod errors;
mod evaluator;
mod sorter;
mod table;

pub use errors::{StoreError, StoreResult};
pub use evaluator::PredicateEvaluator;
pub use sorter::RowSorter;
pub use table::MemoryTable;
