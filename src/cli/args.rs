//! CLI argument definitions using clap
//!
//! Commands:
//! - seekql seed --rows <n> --out <path> [--tie-groups <k>]
//! - seekql query --config <path>
//! - seekql explain --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// seekql - typed filters and keyset pagination over a column registry
#[derive(Parser, Debug)]
#[command(name = "seekql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write fixture rows for the built-in `user` table
    Seed {
        /// Number of rows to write
        #[arg(long, default_value_t = 100)]
        rows: usize,

        /// Output rows file; must not exist
        #[arg(long)]
        out: PathBuf,

        /// Give every K consecutive rows the same `created_at`
        #[arg(long)]
        tie_groups: Option<usize>,
    },

    /// Compile filters from stdin, fetch one page and print it
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./seekql.json")]
        config: PathBuf,
    },

    /// Print the SQL a query request compiles to, without executing it
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./seekql.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from([
            "seekql", "seed", "--rows", "10", "--out", "u.json", "--tie-groups", "3",
        ])
        .unwrap();
        match cli.command {
            Command::Seed {
                rows,
                out,
                tie_groups,
            } => {
                assert_eq!(rows, 10);
                assert_eq!(out, PathBuf::from("u.json"));
                assert_eq!(tie_groups, Some(3));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_query_default_config() {
        let cli = Cli::try_parse_from(["seekql", "query"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Query { config } if config == PathBuf::from("./seekql.json")
        ));
    }

    #[test]
    fn test_seed_requires_out() {
        assert!(Cli::try_parse_from(["seekql", "seed"]).is_err());
    }
}
