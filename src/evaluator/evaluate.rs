//! Recursive keyword evaluation
//!
//! Every applicable keyword at a node is evaluated independently and all
//! failures are collected. Composition and conditional keywords evaluate
//! their subschemas into scratch buffers first, since only their pass/fail
//! outcome (or a chosen branch's errors) may propagate.

use crate::compiler::{pointer, CompiledSchema, NodeId, SchemaNode};
use crate::document::JsonValue;

use super::types::{PathSegment, ValidationError, ValidationResult};

/// Tolerance for `multipleOf` remainders, absorbing floating-point
/// representation error.
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

impl CompiledSchema {
    /// Validates a document against this schema.
    ///
    /// Validation errors are the normal output for non-conforming input;
    /// the returned list is complete, never truncated.
    pub fn validate(&self, value: &JsonValue) -> ValidationResult {
        let evaluator = Evaluator { schema: self };
        let mut errors = Vec::new();
        let mut path = Vec::new();
        evaluator.eval(Self::ROOT, value, &mut path, 0, &mut errors);
        ValidationResult::from_errors(errors)
    }
}

struct Evaluator<'a> {
    schema: &'a CompiledSchema,
}

impl<'a> Evaluator<'a> {
    fn eval(
        &self,
        id: NodeId,
        value: &JsonValue,
        path: &mut Vec<PathSegment>,
        depth: usize,
        out: &mut Vec<ValidationError>,
    ) {
        let node = self.schema.node(id);

        if depth > self.schema.max_depth {
            out.push(error(
                node,
                path,
                "$depth",
                format!("recursion depth limit {} exceeded", self.schema.max_depth),
            ));
            return;
        }

        if node.reject_all {
            out.push(error(node, path, "false", "schema allows no values".into()));
            return;
        }

        if let Some(target) = node.reference {
            self.eval(target, value, path, depth + 1, out);
        }

        self.eval_generic(node, value, path, out);

        match value {
            JsonValue::Number(_) => self.eval_number(node, value, path, out),
            JsonValue::String(s) => self.eval_string(node, s, path, out),
            JsonValue::Array(items) => self.eval_array(node, items, path, depth, out),
            JsonValue::Object(entries) => self.eval_object(node, entries, path, depth, out),
            _ => {}
        }

        self.eval_composition(node, value, path, depth, out);
        self.eval_conditional(node, value, path, depth, out);
    }

    /// Evaluates a subschema into a scratch buffer, for keywords where
    /// only the outcome (or a chosen branch) propagates.
    fn check(
        &self,
        id: NodeId,
        value: &JsonValue,
        path: &mut Vec<PathSegment>,
        depth: usize,
    ) -> Vec<ValidationError> {
        let mut scratch = Vec::new();
        self.eval(id, value, path, depth, &mut scratch);
        scratch
    }

    fn eval_generic(
        &self,
        node: &SchemaNode,
        value: &JsonValue,
        path: &[PathSegment],
        out: &mut Vec<ValidationError>,
    ) {
        if let Some(types) = &node.types {
            if !types.iter().any(|t| t.matches(value)) {
                let allowed: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
                out.push(error(
                    node,
                    path,
                    "type",
                    format!("expected {}, found {}", allowed.join(" or "), value.type_name()),
                ));
            }
        }

        if let Some(members) = &node.enum_values {
            if !members.iter().any(|m| m == value) {
                out.push(error(
                    node,
                    path,
                    "enum",
                    format!("{} is not one of the enumerated values", value),
                ));
            }
        }

        if let Some(expected) = &node.const_value {
            if expected != value {
                out.push(error(
                    node,
                    path,
                    "const",
                    format!("expected constant value {}", expected),
                ));
            }
        }
    }

    fn eval_number(
        &self,
        node: &SchemaNode,
        value: &JsonValue,
        path: &[PathSegment],
        out: &mut Vec<ValidationError>,
    ) {
        let n = match value.as_number() {
            Some(n) => n.as_f64(),
            None => return,
        };

        if let Some(min) = node.minimum {
            if n < min {
                out.push(error(
                    node,
                    path,
                    "minimum",
                    format!("{} is less than minimum {}", value, min),
                ));
            }
        }
        if let Some(max) = node.maximum {
            if n > max {
                out.push(error(
                    node,
                    path,
                    "maximum",
                    format!("{} is greater than maximum {}", value, max),
                ));
            }
        }
        if let Some(min) = node.exclusive_minimum {
            if n <= min {
                out.push(error(
                    node,
                    path,
                    "exclusiveMinimum",
                    format!("{} is not greater than {}", value, min),
                ));
            }
        }
        if let Some(max) = node.exclusive_maximum {
            if n >= max {
                out.push(error(
                    node,
                    path,
                    "exclusiveMaximum",
                    format!("{} is not less than {}", value, max),
                ));
            }
        }
        if let Some(multiple) = node.multiple_of {
            let quotient = n / multiple;
            if (quotient - quotient.round()).abs() > MULTIPLE_OF_EPSILON {
                out.push(error(
                    node,
                    path,
                    "multipleOf",
                    format!("{} is not a multiple of {}", value, multiple),
                ));
            }
        }
    }

    fn eval_string(
        &self,
        node: &SchemaNode,
        s: &str,
        path: &[PathSegment],
        out: &mut Vec<ValidationError>,
    ) {
        // Lengths are counted in Unicode code points, not bytes.
        let length = s.chars().count();

        if let Some(min) = node.min_length {
            if length < min {
                out.push(error(
                    node,
                    path,
                    "minLength",
                    format!("string of length {} is shorter than minLength {}", length, min),
                ));
            }
        }
        if let Some(max) = node.max_length {
            if length > max {
                out.push(error(
                    node,
                    path,
                    "maxLength",
                    format!("string of length {} is longer than maxLength {}", length, max),
                ));
            }
        }
        if let Some(pattern) = &node.pattern {
            if !pattern.is_match(s) {
                out.push(error(
                    node,
                    path,
                    "pattern",
                    format!("string does not match pattern \"{}\"", pattern.source),
                ));
            }
        }
    }

    fn eval_array(
        &self,
        node: &SchemaNode,
        items: &[JsonValue],
        path: &mut Vec<PathSegment>,
        depth: usize,
        out: &mut Vec<ValidationError>,
    ) {
        if let Some(min) = node.min_items {
            if items.len() < min {
                out.push(error(
                    node,
                    path,
                    "minItems",
                    format!("array of length {} has fewer than {} items", items.len(), min),
                ));
            }
        }
        if let Some(max) = node.max_items {
            if items.len() > max {
                out.push(error(
                    node,
                    path,
                    "maxItems",
                    format!("array of length {} has more than {} items", items.len(), max),
                ));
            }
        }

        if node.unique_items {
            'outer: for i in 0..items.len() {
                for j in (i + 1)..items.len() {
                    if items[i] == items[j] {
                        out.push(error(
                            node,
                            path,
                            "uniqueItems",
                            format!("items at positions {} and {} are equal", i, j),
                        ));
                        break 'outer;
                    }
                }
            }
        }

        let prefix_len = node.prefix_items.as_ref().map_or(0, |p| p.len());
        if let Some(prefix) = &node.prefix_items {
            for (i, (item, sub)) in items.iter().zip(prefix.iter()).enumerate() {
                path.push(PathSegment::Index(i));
                self.eval(*sub, item, path, depth + 1, out);
                path.pop();
            }
        }
        if let Some(sub) = node.items {
            for (i, item) in items.iter().enumerate().skip(prefix_len) {
                path.push(PathSegment::Index(i));
                self.eval(sub, item, path, depth + 1, out);
                path.pop();
            }
        }

        if let Some(sub) = node.contains {
            let satisfied = items.iter().enumerate().any(|(i, item)| {
                path.push(PathSegment::Index(i));
                let errors = self.check(sub, item, path, depth + 1);
                path.pop();
                errors.is_empty()
            });
            if !satisfied {
                out.push(error(
                    node,
                    path,
                    "contains",
                    "no array item matches the contains schema".into(),
                ));
            }
        }
    }

    fn eval_object(
        &self,
        node: &SchemaNode,
        entries: &[(String, JsonValue)],
        path: &mut Vec<PathSegment>,
        depth: usize,
        out: &mut Vec<ValidationError>,
    ) {
        if let Some(required) = &node.required {
            for key in required {
                if !entries.iter().any(|(k, _)| k == key) {
                    out.push(error(
                        node,
                        path,
                        "required",
                        format!("missing required property \"{}\"", key),
                    ));
                }
            }
        }

        if let Some(properties) = &node.properties {
            for (name, sub) in properties {
                if let Some((_, value)) = entries.iter().find(|(k, _)| k == name) {
                    path.push(PathSegment::Key(name.clone()));
                    self.eval(*sub, value, path, depth + 1, out);
                    path.pop();
                }
            }
        }

        if let Some(patterns) = &node.pattern_properties {
            for (pattern, sub) in patterns {
                for (key, value) in entries {
                    if pattern.is_match(key) {
                        path.push(PathSegment::Key(key.clone()));
                        self.eval(*sub, value, path, depth + 1, out);
                        path.pop();
                    }
                }
            }
        }

        if let Some(additional) = node.additional_properties {
            for (key, value) in entries {
                if self.is_covered(node, key) {
                    continue;
                }
                if self.schema.node(additional).reject_all {
                    path.push(PathSegment::Key(key.clone()));
                    out.push(error(
                        node,
                        path,
                        "additionalProperties",
                        format!("additional property \"{}\" is not allowed", key),
                    ));
                    path.pop();
                } else {
                    path.push(PathSegment::Key(key.clone()));
                    self.eval(additional, value, path, depth + 1, out);
                    path.pop();
                }
            }
        }
    }

    /// Whether a key is covered by `properties` or any `patternProperties`
    /// entry, and therefore exempt from `additionalProperties`.
    fn is_covered(&self, node: &SchemaNode, key: &str) -> bool {
        if let Some(properties) = &node.properties {
            if properties.iter().any(|(name, _)| name == key) {
                return true;
            }
        }
        if let Some(patterns) = &node.pattern_properties {
            if patterns.iter().any(|(pattern, _)| pattern.is_match(key)) {
                return true;
            }
        }
        false
    }

    fn eval_composition(
        &self,
        node: &SchemaNode,
        value: &JsonValue,
        path: &mut Vec<PathSegment>,
        depth: usize,
        out: &mut Vec<ValidationError>,
    ) {
        if let Some(subs) = &node.all_of {
            // Every subschema must pass; errors from all of them surface.
            for sub in subs {
                self.eval(*sub, value, path, depth + 1, out);
            }
        }

        if let Some(subs) = &node.any_of {
            let branches: Vec<Vec<ValidationError>> = subs
                .iter()
                .map(|sub| self.check(*sub, value, path, depth + 1))
                .collect();
            if !branches.iter().any(|errors| errors.is_empty()) {
                // Surface the branch that got furthest: fewest failures,
                // first branch on ties.
                let best = branches.into_iter().min_by_key(|errors| errors.len());
                match best {
                    Some(errors) => out.extend(errors),
                    None => out.push(error(
                        node,
                        path,
                        "anyOf",
                        "no subschema to match (empty anyOf)".into(),
                    )),
                }
            }
        }

        if let Some(subs) = &node.one_of {
            let matched = subs
                .iter()
                .filter(|sub| self.check(**sub, value, path, depth + 1).is_empty())
                .count();
            if matched != 1 {
                out.push(error(
                    node,
                    path,
                    "oneOf",
                    format!("expected exactly one matching subschema, {} matched", matched),
                ));
            }
        }

        if let Some(sub) = node.not {
            if self.check(sub, value, path, depth + 1).is_empty() {
                out.push(error(
                    node,
                    path,
                    "not",
                    "value matches a schema it must not match".into(),
                ));
            }
        }
    }

    fn eval_conditional(
        &self,
        node: &SchemaNode,
        value: &JsonValue,
        path: &mut Vec<PathSegment>,
        depth: usize,
        out: &mut Vec<ValidationError>,
    ) {
        let condition = match node.if_schema {
            Some(sub) => sub,
            None => return,
        };

        // Only if's outcome matters; its errors never propagate.
        let passed = self.check(condition, value, path, depth + 1).is_empty();
        let branch = if passed {
            node.then_schema
        } else {
            node.else_schema
        };
        if let Some(sub) = branch {
            self.eval(sub, value, path, depth + 1, out);
        }
    }
}

fn error(
    node: &SchemaNode,
    path: &[PathSegment],
    keyword: &'static str,
    message: String,
) -> ValidationError {
    ValidationError {
        path: path.to_vec(),
        keyword,
        message,
        schema_path: pointer::join(&node.schema_path, keyword),
    }
}
