//! CLI module for conforma
//!
//! Provides the `validate` command: read a data document and a schema,
//! compile the schema, validate, and report.
//!
//! Exit codes: 0 valid, 1 invalid, 2 I/O / parse / compile failure.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, validate, EXIT_FATAL, EXIT_INVALID, EXIT_VALID};
pub use errors::{CliError, CliResult};
