//! CLI module for seekql
//!
//! Provides command-line interface for:
//! - seed: Write fixture rows for the built-in `user` table
//! - query: Compile filters and fetch one page
//! - explain: Print the SQL a request compiles to

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    execute_query, explain, explain_query, query, run, run_command, seed, seed_table, QueryRequest,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
