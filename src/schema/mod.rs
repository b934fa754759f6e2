//! Column type registry
//!
//! Maps column names to typed descriptors for one fixed table. The
//! registry is built once from a [`TableSchema`] (built-in or loaded from a
//! JSON file) and is read-only afterwards.
//!
//! # Design Principles
//!
//! - Closed set of kinds, dispatched by exhaustive match
//! - Untyped input is parsed once into a [`TypedValue`]
//! - Lookups are exact and case-sensitive

mod errors;
mod loader;
mod registry;
mod types;
mod value;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use registry::ColumnRegistry;
pub use types::{ColumnDescriptor, ColumnKind, TableSchema};
pub use value::TypedValue;
