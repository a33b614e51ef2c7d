//! Error reporter for conforma
//!
//! Formats an accumulated error list into a stable, sorted shape for
//! humans, and exposes the raw result as JSON for machines. Ordering is
//! deterministic: stable sort by rendered instance path, then keyword.

use crate::evaluator::{ValidationError, ValidationResult};

/// Formats a result as one line per error, deterministically ordered.
///
/// Lines have the shape `<path>: <keyword> — <message>`; the document
/// root renders as `/`.
pub fn format_errors(result: &ValidationResult) -> Vec<String> {
    let mut ordered: Vec<&ValidationError> = result.errors.iter().collect();
    ordered.sort_by(|a, b| {
        (a.pointer(), a.keyword).cmp(&(b.pointer(), b.keyword))
    });
    ordered.iter().map(|e| format_line(e)).collect()
}

fn format_line(error: &ValidationError) -> String {
    let pointer = error.pointer();
    let path = if pointer.is_empty() { "/" } else { &pointer };
    format!("{}: {} — {}", path, error.keyword, error.message)
}

/// Machine-readable form of a result.
pub fn to_json(result: &ValidationResult) -> serde_json::Value {
    serde_json::json!({
        "valid": result.valid,
        "errors": result
            .errors
            .iter()
            .map(|e| serde_json::json!({
                "path": e.pointer(),
                "keyword": e.keyword,
                "message": e.message,
                "schemaPath": e.schema_path,
            }))
            .collect::<Vec<_>>(),
    })
}
