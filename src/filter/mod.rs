//! Filter compiler
//!
//! Compiles loosely-typed `(field, value, operator)` filters into typed
//! predicates over a [`ColumnRegistry`](crate::schema::ColumnRegistry).
//!
//! Tolerant where the request is merely stale (unknown field, blank value),
//! strict where it is malformed (unparseable value, operator the column
//! kind cannot support).

mod compiler;
mod errors;
mod input;

pub use compiler::{compile, CompileReport, FilterCompiler, SkippedFilter};
pub use errors::{FilterError, FilterErrorCode, FilterResult, Severity};
pub use input::{FilterInput, Operator};
