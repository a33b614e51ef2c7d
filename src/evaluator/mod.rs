//! Validation evaluator for conforma
//!
//! Recursively evaluates a compiled schema against a document value,
//! accumulating every applicable keyword failure with its instance path.
//! Validation errors are the normal output for non-conforming documents,
//! never exceptions, and the list is never truncated at the first failure.
//!
//! # Design Principles
//!
//! - Evaluation is read-only over the compiled schema
//! - Deterministic: same schema + same document = same errors
//! - Recursion is depth-bounded, never stack-exhausting

mod evaluate;
mod types;

pub use types::{PathSegment, ValidationError, ValidationResult};
