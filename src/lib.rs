//! conforma - A strict, deterministic JSON Schema validation engine
//!
//! Pipeline: raw bytes -> document model -> compiled schema -> validation
//! result -> formatted report.

pub mod cli;
pub mod compiler;
pub mod document;
pub mod evaluator;
pub mod report;

pub use compiler::{compile, compile_with, CompileError, CompileOptions, CompiledSchema};
pub use document::{parse_json, parse_yaml, JsonValue, Number, ParseError};
pub use evaluator::{PathSegment, ValidationError, ValidationResult};
pub use report::{format_errors, to_json};
