//! Document model for conforma
//!
//! A language-neutral in-memory tree of JSON-like values, produced by the
//! JSON and YAML parse adapters and consumed by the compiler and evaluator.
//!
//! # Design Principles
//!
//! - Immutable once constructed
//! - Integers and floats are distinguishable (for `type: integer`)
//! - Equality is structural: object key order is irrelevant, and numeric
//!   values compare by value across the int/float split
//! - Both parse adapters produce identical shapes for equivalent input

mod errors;
mod parse;
mod value;

pub use errors::ParseError;
pub use parse::{parse_json, parse_yaml};
pub use value::{JsonValue, Number};
