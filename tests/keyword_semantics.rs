//! Keyword semantics at the library surface
//!
//! Realistic schemas combining several keywords, exercising:
//! - Error accumulation (all failures reported, no short-circuit)
//! - Deterministic reporter ordering
//! - Composition and conditionals over nested data
//! - YAML and JSON schema equivalence

use conforma::{compile, format_errors, parse_json, parse_yaml};

// =============================================================================
// Helper Functions
// =============================================================================

fn doc(text: &str) -> conforma::JsonValue {
    parse_json(text).unwrap()
}

const USER_SCHEMA: &str = r##"{
    "type": "object",
    "required": ["name", "age"],
    "properties": {
        "name": {"type": "string", "minLength": 1, "maxLength": 64},
        "age": {"type": "integer", "minimum": 0, "maximum": 150},
        "email": {"type": "string", "pattern": "@"},
        "roles": {
            "type": "array",
            "items": {"enum": ["admin", "editor", "viewer"]},
            "uniqueItems": true,
            "minItems": 1
        }
    },
    "additionalProperties": false
}"##;

// =============================================================================
// Error Accumulation
// =============================================================================

/// Every defect is reported in one pass, never just the first.
#[test]
fn test_all_failures_are_collected() {
    let compiled = compile(&doc(USER_SCHEMA)).unwrap();
    let result = compiled.validate(&doc(
        r#"{
            "name": "",
            "age": -3,
            "email": "nope",
            "roles": [],
            "extra": true
        }"#,
    ));

    assert!(!result.valid);
    let mut keywords: Vec<&str> = result.errors.iter().map(|e| e.keyword).collect();
    keywords.sort_unstable();
    assert_eq!(
        keywords,
        vec![
            "additionalProperties",
            "minItems",
            "minLength",
            "minimum",
            "pattern"
        ]
    );
}

/// Reporter output is stably ordered by path, then keyword.
#[test]
fn test_report_ordering_is_deterministic() {
    let compiled = compile(&doc(USER_SCHEMA)).unwrap();
    let result = compiled.validate(&doc(
        r#"{"name": "", "age": -3, "email": "nope", "roles": [], "extra": true}"#,
    ));

    let lines = format_errors(&result);
    let paths: Vec<&str> = lines
        .iter()
        .map(|line| line.split(':').next().unwrap())
        .collect();
    assert_eq!(paths, vec!["/age", "/email", "/extra", "/name", "/roles"]);
}

/// A conforming document produces no errors at all.
#[test]
fn test_conforming_document() {
    let compiled = compile(&doc(USER_SCHEMA)).unwrap();
    let result = compiled.validate(&doc(
        r#"{
            "name": "Ada",
            "age": 36,
            "email": "ada@example.com",
            "roles": ["admin", "viewer"]
        }"#,
    ));
    assert!(result.valid);
    assert!(result.errors.is_empty());
}

// =============================================================================
// Composition Over Nested Data
// =============================================================================

/// allOf failures surface from every branch; anyOf surfaces the closest
/// branch only.
#[test]
fn test_composition_error_surfacing() {
    let compiled = compile(&doc(
        r#"{
            "allOf": [
                {"properties": {"kind": {"const": "point"}}},
                {"required": ["x", "y"]}
            ]
        }"#,
    ))
    .unwrap();
    let result = compiled.validate(&doc(r#"{"kind": "circle", "x": 0}"#));
    let keywords: Vec<&str> = result.errors.iter().map(|e| e.keyword).collect();
    assert_eq!(keywords, vec!["const", "required"]);

    let compiled = compile(&doc(
        r#"{
            "anyOf": [
                {"type": "object", "required": ["x", "y", "z"]},
                {"type": "string"}
            ]
        }"#,
    ))
    .unwrap();
    // Branch 0 fails with 3 errors, branch 1 with 1; the closest branch
    // (branch 1) surfaces.
    let result = compiled.validate(&doc("{}"));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].keyword, "type");
}

/// if/then/else over a discriminated union.
#[test]
fn test_conditional_discrimination() {
    let compiled = compile(&doc(
        r#"{
            "if": {"properties": {"kind": {"const": "circle"}}, "required": ["kind"]},
            "then": {"required": ["radius"]},
            "else": {"required": ["width", "height"]}
        }"#,
    ))
    .unwrap();

    assert!(compiled.validate(&doc(r#"{"kind": "circle", "radius": 2}"#)).valid);
    assert!(!compiled.validate(&doc(r#"{"kind": "circle"}"#)).valid);
    assert!(compiled
        .validate(&doc(r#"{"kind": "rect", "width": 1, "height": 2}"#))
        .valid);
    assert!(!compiled.validate(&doc(r#"{"kind": "rect", "width": 1}"#)).valid);
}

// =============================================================================
// YAML Equivalence
// =============================================================================

/// A schema written in YAML behaves exactly like its JSON equivalent.
#[test]
fn test_yaml_schema_equals_json_schema() {
    let yaml_schema = parse_yaml(
        "type: object\n\
         required: [name]\n\
         properties:\n\
         \x20 name:\n\
         \x20   type: string\n\
         \x20   minLength: 2\n",
    )
    .unwrap();
    let json_schema = doc(
        r#"{
            "type": "object",
            "required": ["name"],
            "properties": {"name": {"type": "string", "minLength": 2}}
        }"#,
    );
    assert_eq!(yaml_schema, json_schema);

    let from_yaml = compile(&yaml_schema).unwrap();
    let from_json = compile(&json_schema).unwrap();
    let data = doc(r#"{"name": "x"}"#);
    assert_eq!(
        format_errors(&from_yaml.validate(&data)),
        format_errors(&from_json.validate(&data))
    );
}
