//! seekql - typed filter compilation and keyset pagination
//!
//! - [`schema`]: column type registry and typed values
//! - [`temporal`]: zoned timestamp codec
//! - [`filter`]: compiles loosely-typed filters into predicates
//! - [`pagination`]: `(timestamp, id)` keyset pagination and cursors
//! - [`query`]: the query model handed to a storage engine
//! - [`store`]: in-memory reference engine

pub mod cli;
pub mod config;
pub mod dialect;
pub mod filter;
pub mod observability;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod store;
pub mod temporal;
