//! CLI command implementations
//!
//! The `validate` command is the whole surface: read both files, compile
//! the schema, validate the data, and report. Fatal errors (I/O, parse,
//! compile) print a single diagnostic; validation failures print the full
//! accumulated list, never just the first.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::compiler::{compile_with, CompileOptions};
use crate::document::{parse_json, parse_yaml, JsonValue};
use crate::evaluator::ValidationResult;
use crate::report;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Document is valid.
pub const EXIT_VALID: i32 = 0;
/// Document does not conform to the schema.
pub const EXIT_INVALID: i32 = 1;
/// I/O, parse, or compile failure.
pub const EXIT_FATAL: i32 = 2;

/// CLI entry point: parse arguments, dispatch, return the exit code.
pub fn run() -> i32 {
    init_tracing();
    run_command(Cli::parse_args())
}

/// Logging goes to stderr and is controlled by RUST_LOG; silent by
/// default so reporter output stays clean.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Dispatches a parsed command and returns the process exit code.
pub fn run_command(cli: Cli) -> i32 {
    match cli.command {
        Command::Validate {
            data_file,
            schema_file,
            strict,
            json,
            max_depth,
        } => {
            let result = match validate(&data_file, &schema_file, strict, max_depth) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("{}", e);
                    return EXIT_FATAL;
                }
            };

            if json {
                println!("{}", report::to_json(&result));
            } else if result.valid {
                println!(
                    "{} conforms to schema {}",
                    data_file.display(),
                    schema_file.display()
                );
            } else {
                eprintln!(
                    "{} does NOT conform to schema {}:",
                    data_file.display(),
                    schema_file.display()
                );
                for line in report::format_errors(&result) {
                    eprintln!("{}", line);
                }
            }

            if result.valid {
                EXIT_VALID
            } else {
                EXIT_INVALID
            }
        }
    }
}

/// Reads, parses, compiles, and validates. Only fatal conditions are
/// errors; a non-conforming document is an `Ok` result with `valid: false`.
pub fn validate(
    data_file: &Path,
    schema_file: &Path,
    strict: bool,
    max_depth: usize,
) -> CliResult<ValidationResult> {
    let data = read_document(data_file, false)?;
    let schema_doc = read_document(schema_file, true)?;

    let options = CompileOptions { strict, max_depth };
    let compiled = compile_with(&schema_doc, &options).map_err(|source| CliError::Compile {
        path: schema_file.display().to_string(),
        source,
    })?;

    Ok(compiled.validate(&data))
}

fn read_document(path: &Path, allow_yaml: bool) -> CliResult<JsonValue> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let parsed = if allow_yaml && is_yaml(path) {
        parse_yaml(&text)
    } else {
        parse_json(&text)
    };

    parsed.map_err(|source| CliError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
