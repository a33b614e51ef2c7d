//! CLI-specific error types
//!
//! Everything here is fatal to the invocation (exit code 2): unreadable
//! files, malformed input, schema compile failures. Validation failures
//! are not errors; they are the normal output of `validate`.

use thiserror::Error;

use crate::compiler::CompileError;
use crate::document::ParseError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Fatal CLI errors, each naming the offending file.
#[derive(Debug, Error)]
pub enum CliError {
    /// File could not be read
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// File is not well-formed JSON/YAML
    #[error("{path}: {source}")]
    Parse { path: String, source: ParseError },

    /// Schema document does not compile
    #[error("schema {path}: {source}")]
    Compile {
        path: String,
        source: CompileError,
    },
}
