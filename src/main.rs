//! conforma CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Parses CLI arguments (via cli::run)
//! 2. Dispatches to CLI commands (via cli::run)
//! 3. Exits with the command's status code
//!
//! All logic, including error printing, is delegated to the CLI module.

use conforma::cli;

fn main() {
    std::process::exit(cli::run());
}
