//! Schema compiler for conforma
//!
//! Walks a schema document once, extracts recognized keywords into an
//! arena of [`SchemaNode`]s, then resolves every `$ref` against the
//! collected JSON Pointer locations. Unresolved references are a
//! compile-time error; reference cycles are legal and compile to integer
//! node ids, so the graph never owns itself.
//!
//! # Design Principles
//!
//! - Compilation is deterministic
//! - All references resolve before compilation completes
//! - Unknown keywords are ignored (annotation convention)
//! - Patterns are compiled once, here, never at validation time

mod compile;
mod errors;
mod node;
pub mod pointer;

pub use compile::{compile, compile_with, CompileOptions};
pub use errors::CompileError;
pub use node::{CompiledPattern, CompiledSchema, NodeId, SchemaNode, TypeTag};
