//! Parse error type for the document model
//!
//! Input errors are always fatal to the invocation; they are never
//! partially recovered and never conflated with compile or validation
//! errors.

use thiserror::Error;

/// Error produced when raw bytes cannot be parsed into a document tree.
#[derive(Debug, Clone, Error)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    /// 1-based line of the offending input, 0 if unknown
    pub line: usize,
    /// 1-based column of the offending input, 0 if unknown
    pub column: usize,
    /// Human-readable description from the underlying parser
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}
