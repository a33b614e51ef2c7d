//! Two-pass schema compilation
//!
//! Pass 1 walks the schema document depth-first, extracting recognized
//! keywords into arena nodes and registering every schema location under
//! its JSON Pointer. Pass 2 resolves `$ref` placeholders by exact pointer
//! match. Cycles resolve like any other reference since targets are
//! integer ids.

use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, warn};

use crate::document::{JsonValue, Number};

use super::errors::CompileError;
use super::node::{CompiledPattern, CompiledSchema, NodeId, SchemaNode, TypeTag};
use super::pointer;

/// Draft identifiers this engine recognizes, compared with any trailing
/// `#` removed.
const KNOWN_DRAFTS: &[&str] = &[
    "http://json-schema.org/draft-04/schema",
    "http://json-schema.org/draft-06/schema",
    "http://json-schema.org/draft-07/schema",
    "https://json-schema.org/draft/2019-09/schema",
    "https://json-schema.org/draft/2020-12/schema",
];

/// Compiler configuration.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Treat an unrecognized `$schema` identifier as fatal instead of a
    /// warning.
    pub strict: bool,
    /// Maximum schema nesting depth, shared with the evaluator's
    /// recursion budget.
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: 1000,
        }
    }
}

/// Compiles a schema document with default options.
pub fn compile(schema_doc: &JsonValue) -> Result<CompiledSchema, CompileError> {
    compile_with(schema_doc, &CompileOptions::default())
}

/// Compiles a schema document.
pub fn compile_with(
    schema_doc: &JsonValue,
    options: &CompileOptions,
) -> Result<CompiledSchema, CompileError> {
    let mut compiler = Compiler {
        options,
        nodes: Vec::new(),
        locations: HashMap::new(),
        pending_refs: Vec::new(),
    };

    let root = compiler.compile_value(schema_doc, "#".to_string(), 0)?;
    debug_assert_eq!(root, CompiledSchema::ROOT);

    let refs = compiler.resolve_refs()?;

    debug!(nodes = compiler.nodes.len(), refs, "schema compiled");

    Ok(CompiledSchema {
        nodes: compiler.nodes,
        max_depth: options.max_depth,
    })
}

struct Compiler<'a> {
    options: &'a CompileOptions,
    nodes: Vec<SchemaNode>,
    /// JSON Pointer -> node id, for `$ref` resolution.
    locations: HashMap<String, NodeId>,
    /// (referring node, `$ref` target string) placeholders for pass 2.
    pending_refs: Vec<(NodeId, String)>,
}

impl<'a> Compiler<'a> {
    /// Compiles one schema value (object or boolean) into a node.
    fn compile_value(
        &mut self,
        value: &JsonValue,
        path: String,
        depth: usize,
    ) -> Result<NodeId, CompileError> {
        if depth > self.options.max_depth {
            return Err(CompileError::DepthExceeded(self.options.max_depth));
        }

        // Allocate first so the location map sees every node, then fill.
        let id = self.nodes.len();
        self.nodes.push(SchemaNode::at(path.clone()));
        self.locations.insert(path.clone(), id);

        let entries = match value {
            JsonValue::Bool(true) => return Ok(id),
            JsonValue::Bool(false) => {
                self.nodes[id].reject_all = true;
                return Ok(id);
            }
            JsonValue::Object(entries) => entries,
            other => {
                return Err(CompileError::InvalidSchemaForm {
                    path,
                    found: other.type_name(),
                })
            }
        };

        let mut node = SchemaNode::at(path.clone());

        for (keyword, kw_value) in entries {
            let kw_path = pointer::join(&path, keyword);
            match keyword.as_str() {
                "$schema" => self.check_draft(kw_value, &kw_path)?,
                "$ref" => {
                    let target = expect_string(kw_value, &kw_path, keyword)?;
                    self.pending_refs.push((id, target.to_string()));
                }
                "$defs" | "definitions" => {
                    // Compiled so refs can target them; never evaluated
                    // directly.
                    let members = expect_object(kw_value, &kw_path, keyword)?;
                    for (name, member) in members {
                        let member_path = pointer::join(&kw_path, name);
                        self.compile_value(member, member_path, depth + 1)?;
                    }
                }

                "type" => node.types = Some(parse_types(kw_value, &kw_path)?),
                "enum" => {
                    let members = expect_array(kw_value, &kw_path, keyword)?;
                    node.enum_values = Some(members.to_vec());
                }
                "const" => node.const_value = Some(kw_value.clone()),

                "minimum" => node.minimum = Some(expect_number(kw_value, &kw_path, keyword)?),
                "maximum" => node.maximum = Some(expect_number(kw_value, &kw_path, keyword)?),
                "exclusiveMinimum" => {
                    node.exclusive_minimum = Some(expect_number(kw_value, &kw_path, keyword)?)
                }
                "exclusiveMaximum" => {
                    node.exclusive_maximum = Some(expect_number(kw_value, &kw_path, keyword)?)
                }
                "multipleOf" => {
                    let m = expect_number(kw_value, &kw_path, keyword)?;
                    if m <= 0.0 {
                        return Err(invalid(&kw_path, keyword, "must be greater than zero"));
                    }
                    node.multiple_of = Some(m);
                }

                "minLength" => node.min_length = Some(expect_count(kw_value, &kw_path, keyword)?),
                "maxLength" => node.max_length = Some(expect_count(kw_value, &kw_path, keyword)?),
                "pattern" => {
                    let source = expect_string(kw_value, &kw_path, keyword)?;
                    node.pattern = Some(compile_pattern(source, &kw_path, keyword)?);
                }

                "minItems" => node.min_items = Some(expect_count(kw_value, &kw_path, keyword)?),
                "maxItems" => node.max_items = Some(expect_count(kw_value, &kw_path, keyword)?),
                "uniqueItems" => {
                    node.unique_items = kw_value
                        .as_bool()
                        .ok_or_else(|| invalid(&kw_path, keyword, "must be a boolean"))?;
                }
                "prefixItems" => {
                    node.prefix_items =
                        Some(self.compile_list(kw_value, &kw_path, keyword, depth)?);
                }
                "items" => match kw_value {
                    // Draft-07 array form doubles as prefixItems.
                    JsonValue::Array(_) => {
                        node.prefix_items =
                            Some(self.compile_list(kw_value, &kw_path, keyword, depth)?);
                    }
                    _ => node.items = Some(self.compile_value(kw_value, kw_path, depth + 1)?),
                },
                "contains" => {
                    node.contains = Some(self.compile_value(kw_value, kw_path, depth + 1)?)
                }

                "required" => {
                    let members = expect_array(kw_value, &kw_path, keyword)?;
                    let mut keys = Vec::with_capacity(members.len());
                    for member in members {
                        keys.push(
                            member
                                .as_str()
                                .ok_or_else(|| {
                                    invalid(&kw_path, keyword, "members must be strings")
                                })?
                                .to_string(),
                        );
                    }
                    node.required = Some(keys);
                }
                "properties" => {
                    let members = expect_object(kw_value, &kw_path, keyword)?;
                    let mut props = Vec::with_capacity(members.len());
                    for (name, member) in members {
                        let member_path = pointer::join(&kw_path, name);
                        let sub = self.compile_value(member, member_path, depth + 1)?;
                        props.push((name.clone(), sub));
                    }
                    node.properties = Some(props);
                }
                "patternProperties" => {
                    let members = expect_object(kw_value, &kw_path, keyword)?;
                    let mut props = Vec::with_capacity(members.len());
                    for (source, member) in members {
                        let member_path = pointer::join(&kw_path, source);
                        let regex = compile_pattern(source, &member_path, keyword)?;
                        let sub = self.compile_value(member, member_path, depth + 1)?;
                        props.push((regex, sub));
                    }
                    node.pattern_properties = Some(props);
                }
                "additionalProperties" => {
                    node.additional_properties =
                        Some(self.compile_value(kw_value, kw_path, depth + 1)?);
                }

                "allOf" => node.all_of = Some(self.compile_list(kw_value, &kw_path, keyword, depth)?),
                "anyOf" => node.any_of = Some(self.compile_list(kw_value, &kw_path, keyword, depth)?),
                "oneOf" => node.one_of = Some(self.compile_list(kw_value, &kw_path, keyword, depth)?),
                "not" => node.not = Some(self.compile_value(kw_value, kw_path, depth + 1)?),

                "if" => node.if_schema = Some(self.compile_value(kw_value, kw_path, depth + 1)?),
                "then" => node.then_schema = Some(self.compile_value(kw_value, kw_path, depth + 1)?),
                "else" => node.else_schema = Some(self.compile_value(kw_value, kw_path, depth + 1)?),

                // Unknown keywords are annotations; preserved in the
                // document, ignored by evaluation.
                _ => {}
            }
        }

        self.nodes[id] = node;
        Ok(id)
    }

    /// Compiles an array of subschemas, keeping document order.
    fn compile_list(
        &mut self,
        value: &JsonValue,
        path: &str,
        keyword: &str,
        depth: usize,
    ) -> Result<Vec<NodeId>, CompileError> {
        let members = expect_array(value, path, keyword)?;
        let mut ids = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            let member_path = pointer::join_index(path, i);
            ids.push(self.compile_value(member, member_path, depth + 1)?);
        }
        Ok(ids)
    }

    /// Pass 2: resolve every `$ref` placeholder by exact pointer match.
    fn resolve_refs(&mut self) -> Result<usize, CompileError> {
        let pending = std::mem::take(&mut self.pending_refs);
        for (node_id, target) in &pending {
            match self.locations.get(target.as_str()).copied() {
                Some(target_id) => self.nodes[*node_id].reference = Some(target_id),
                None => return Err(CompileError::UnresolvedReference(target.clone())),
            }
        }
        Ok(pending.len())
    }

    fn check_draft(&self, value: &JsonValue, path: &str) -> Result<(), CompileError> {
        let identifier = expect_string(value, path, "$schema")?;
        let normalized = identifier.trim_end_matches('#');
        if KNOWN_DRAFTS.contains(&normalized) {
            return Ok(());
        }
        if self.options.strict {
            return Err(CompileError::UnsupportedSchemaVersion(identifier.to_string()));
        }
        warn!(draft = identifier, "unrecognized $schema identifier, continuing");
        Ok(())
    }
}

fn invalid(path: &str, keyword: &str, reason: impl Into<String>) -> CompileError {
    CompileError::InvalidKeywordValue {
        path: path.to_string(),
        keyword: keyword.to_string(),
        reason: reason.into(),
    }
}

fn expect_string<'v>(
    value: &'v JsonValue,
    path: &str,
    keyword: &str,
) -> Result<&'v str, CompileError> {
    value
        .as_str()
        .ok_or_else(|| invalid(path, keyword, "must be a string"))
}

fn expect_number(value: &JsonValue, path: &str, keyword: &str) -> Result<f64, CompileError> {
    value
        .as_number()
        .map(|n| n.as_f64())
        .ok_or_else(|| invalid(path, keyword, "must be a number"))
}

/// A non-negative integer, for length and count keywords.
fn expect_count(value: &JsonValue, path: &str, keyword: &str) -> Result<usize, CompileError> {
    match value.as_number() {
        Some(Number::Int(i)) if i >= 0 => Ok(i as usize),
        Some(Number::Float(f)) if f >= 0.0 && f.fract() == 0.0 => Ok(f as usize),
        _ => Err(invalid(path, keyword, "must be a non-negative integer")),
    }
}

fn expect_array<'v>(
    value: &'v JsonValue,
    path: &str,
    keyword: &str,
) -> Result<&'v [JsonValue], CompileError> {
    value
        .as_array()
        .ok_or_else(|| invalid(path, keyword, "must be an array"))
}

fn expect_object<'v>(
    value: &'v JsonValue,
    path: &str,
    keyword: &str,
) -> Result<&'v [(String, JsonValue)], CompileError> {
    value
        .as_object()
        .ok_or_else(|| invalid(path, keyword, "must be an object"))
}

fn parse_types(value: &JsonValue, path: &str) -> Result<Vec<TypeTag>, CompileError> {
    let parse_one = |v: &JsonValue| -> Result<TypeTag, CompileError> {
        let name = expect_string(v, path, "type")?;
        TypeTag::from_keyword(name)
            .ok_or_else(|| invalid(path, "type", format!("unknown type '{}'", name)))
    };
    match value {
        JsonValue::Array(members) => members.iter().map(parse_one).collect(),
        single => Ok(vec![parse_one(single)?]),
    }
}

fn compile_pattern(
    source: &str,
    path: &str,
    keyword: &str,
) -> Result<CompiledPattern, CompileError> {
    let regex = Regex::new(source)
        .map_err(|e| invalid(path, keyword, format!("invalid regular expression: {}", e)))?;
    Ok(CompiledPattern {
        source: source.to_string(),
        regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_json;

    fn schema(text: &str) -> JsonValue {
        parse_json(text).unwrap()
    }

    #[test]
    fn test_empty_schema_compiles_to_single_root_node() {
        let compiled = compile(&schema("{}")).unwrap();
        assert_eq!(compiled.node_count(), 1);
        assert!(!compiled.node(CompiledSchema::ROOT).reject_all);
    }

    #[test]
    fn test_boolean_schemas_compile() {
        assert!(!compile(&schema("true")).unwrap().node(0).reject_all);
        assert!(compile(&schema("false")).unwrap().node(0).reject_all);
    }

    #[test]
    fn test_ref_resolves_to_defs_member() {
        let compiled = compile(&schema(
            r##"{"$ref": "#/$defs/a", "$defs": {"a": {"type": "string"}}}"##,
        ))
        .unwrap();
        let target = compiled.node(CompiledSchema::ROOT).reference.unwrap();
        assert_eq!(compiled.node(target).types, Some(vec![TypeTag::String]));
    }

    #[test]
    fn test_unresolved_ref_is_a_compile_error() {
        let err = compile(&schema(r##"{"$ref": "#/$defs/missing"}"##)).unwrap_err();
        match err {
            CompileError::UnresolvedReference(target) => {
                assert_eq!(target, "#/$defs/missing");
            }
            other => panic!("expected UnresolvedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_cyclic_refs_compile() {
        let compiled = compile(&schema(
            r##"{
                "$defs": {
                    "a": {"$ref": "#/$defs/b"},
                    "b": {"$ref": "#/$defs/a"}
                },
                "$ref": "#/$defs/a"
            }"##,
        ))
        .unwrap();
        assert!(compiled.node(CompiledSchema::ROOT).reference.is_some());
    }

    #[test]
    fn test_invalid_pattern_is_a_compile_error() {
        let err = compile(&schema(r#"{"pattern": "["}"#)).unwrap_err();
        match err {
            CompileError::InvalidKeywordValue { keyword, .. } => assert_eq!(keyword, "pattern"),
            other => panic!("expected InvalidKeywordValue, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_keyword_value_carries_schema_path() {
        let err = compile(&schema(
            r#"{"properties": {"a": {"minLength": -1}}}"#,
        ))
        .unwrap_err();
        match err {
            CompileError::InvalidKeywordValue { path, keyword, .. } => {
                assert_eq!(path, "#/properties/a/minLength");
                assert_eq!(keyword, "minLength");
            }
            other => panic!("expected InvalidKeywordValue, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_draft_is_fatal_only_in_strict_mode() {
        let doc = schema(r#"{"$schema": "https://example.com/unknown"}"#);
        assert!(compile(&doc).is_ok());

        let strict = CompileOptions {
            strict: true,
            ..CompileOptions::default()
        };
        let err = compile_with(&doc, &strict).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedSchemaVersion(_)));
    }

    #[test]
    fn test_known_drafts_pass_in_strict_mode() {
        let strict = CompileOptions {
            strict: true,
            ..CompileOptions::default()
        };
        let doc = schema(r#"{"$schema": "http://json-schema.org/draft-07/schema#"}"#);
        assert!(compile_with(&doc, &strict).is_ok());
    }

    #[test]
    fn test_items_array_form_becomes_prefix_items() {
        let compiled = compile(&schema(
            r#"{"items": [{"type": "string"}, {"type": "integer"}]}"#,
        ))
        .unwrap();
        let root = compiled.node(CompiledSchema::ROOT);
        assert_eq!(root.prefix_items.as_ref().unwrap().len(), 2);
        assert!(root.items.is_none());
    }

    #[test]
    fn test_non_schema_value_in_schema_position() {
        let err = compile(&schema(r#"{"not": 3}"#)).unwrap_err();
        assert!(matches!(err, CompileError::InvalidSchemaForm { .. }));
    }

    #[test]
    fn test_ref_can_target_any_compiled_location() {
        let compiled = compile(&schema(
            r##"{
                "properties": {"a": {"type": "integer"}},
                "$defs": {"alias": {"$ref": "#/properties/a"}}
            }"##,
        ))
        .unwrap();
        assert!(compiled.node_count() >= 3);
    }
}
