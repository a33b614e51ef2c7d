//! CLI argument definitions using clap
//!
//! Commands:
//! - conforma validate <data-file> <schema-file> [--strict] [--json] [--max-depth N]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// conforma - A strict, deterministic JSON Schema validation engine
#[derive(Parser, Debug)]
#[command(name = "conforma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a data document against a schema
    Validate {
        /// Path to the data document (JSON)
        data_file: PathBuf,

        /// Path to the schema document (YAML by .yaml/.yml extension,
        /// JSON otherwise)
        schema_file: PathBuf,

        /// Treat an unrecognized $schema identifier as fatal
        #[arg(long)]
        strict: bool,

        /// Print the machine-readable result as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Recursion depth limit for compilation and validation
        #[arg(long, default_value_t = 1000)]
        max_depth: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
