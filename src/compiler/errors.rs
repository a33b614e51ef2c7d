//! Compile error types
//!
//! Compile errors are fatal: validation cannot proceed without a valid
//! compiled schema. Every variant carries the JSON Pointer of the defect
//! so the caller can locate it in the schema document.

use thiserror::Error;

/// Errors produced while compiling a schema document.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    /// A `$ref` target does not exist in the schema document.
    #[error("unresolved reference {0}")]
    UnresolvedReference(String),

    /// A recognized keyword holds a value of the wrong shape.
    #[error("invalid value for keyword '{keyword}' at {path}: {reason}")]
    InvalidKeywordValue {
        path: String,
        keyword: String,
        reason: String,
    },

    /// A subschema position holds something other than an object or boolean.
    #[error("schema at {path} must be an object or boolean, found {found}")]
    InvalidSchemaForm { path: String, found: &'static str },

    /// `$schema` names a draft this engine does not recognize (strict mode).
    #[error("unsupported schema version {0}")]
    UnsupportedSchemaVersion(String),

    /// Schema nesting exceeded the configured depth limit.
    #[error("schema nesting exceeds depth limit {0}")]
    DepthExceeded(usize),
}
