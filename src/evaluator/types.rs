//! Validation result types
//!
//! Immutable value types, serializable for machine consumption.

use serde::Serialize;

use crate::compiler::pointer;

/// One step of an instance path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A single keyword failure at one location in the document.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Instance path from the document root to the failing value.
    pub path: Vec<PathSegment>,
    /// The keyword that failed.
    pub keyword: &'static str,
    /// Human-readable description.
    pub message: String,
    /// JSON Pointer into the compiled schema.
    #[serde(rename = "schemaPath")]
    pub schema_path: String,
}

impl ValidationError {
    /// Renders the instance path as a JSON Pointer (`/a/0/b`); empty for
    /// the document root.
    pub fn pointer(&self) -> String {
        let mut rendered = String::new();
        for segment in &self.path {
            rendered.push('/');
            match segment {
                PathSegment::Key(k) => rendered.push_str(&pointer::escape(k)),
                PathSegment::Index(i) => rendered.push_str(&i.to_string()),
            }
        }
        rendered
    }
}

/// Outcome of validating one document against one compiled schema.
///
/// `errors` is empty iff `valid`; the constructor is the only way to
/// build one, so the invariant holds by construction.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_rendering_escapes_keys() {
        let error = ValidationError {
            path: vec![
                PathSegment::Key("a/b".into()),
                PathSegment::Index(0),
                PathSegment::Key("~x".into()),
            ],
            keyword: "type",
            message: String::new(),
            schema_path: "#".into(),
        };
        assert_eq!(error.pointer(), "/a~1b/0/~0x");
    }

    #[test]
    fn test_root_path_renders_empty() {
        let error = ValidationError {
            path: Vec::new(),
            keyword: "type",
            message: String::new(),
            schema_path: "#".into(),
        };
        assert_eq!(error.pointer(), "");
    }

    #[test]
    fn test_valid_iff_no_errors() {
        assert!(ValidationResult::from_errors(Vec::new()).valid);
        let failing = ValidationResult::from_errors(vec![ValidationError {
            path: Vec::new(),
            keyword: "type",
            message: String::new(),
            schema_path: "#".into(),
        }]);
        assert!(!failing.valid);
    }
}
