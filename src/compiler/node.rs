//! Compiled schema representation
//!
//! A [`CompiledSchema`] owns every [`SchemaNode`] in an arena; references
//! between nodes are integer [`NodeId`]s, so mutually recursive schemas
//! carry no ownership cycles. The root node is always index 0.

use regex::Regex;

use crate::document::JsonValue;

/// Index of a node within a [`CompiledSchema`] arena.
pub type NodeId = usize;

/// The runtime type tags a `type` keyword may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Null,
    Boolean,
    Number,
    Integer,
    String,
    Array,
    Object,
}

impl TypeTag {
    /// Parses a `type` keyword member.
    pub fn from_keyword(name: &str) -> Option<TypeTag> {
        match name {
            "null" => Some(TypeTag::Null),
            "boolean" => Some(TypeTag::Boolean),
            "number" => Some(TypeTag::Number),
            "integer" => Some(TypeTag::Integer),
            "string" => Some(TypeTag::String),
            "array" => Some(TypeTag::Array),
            "object" => Some(TypeTag::Object),
            _ => None,
        }
    }

    /// The keyword spelling, for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::Integer => "integer",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    /// Whether a value satisfies this tag. `integer` is satisfied by any
    /// numeric value with no fractional part.
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            TypeTag::Null => matches!(value, JsonValue::Null),
            TypeTag::Boolean => matches!(value, JsonValue::Bool(_)),
            TypeTag::Number => matches!(value, JsonValue::Number(_)),
            TypeTag::Integer => match value {
                JsonValue::Number(n) => n.is_integer(),
                _ => false,
            },
            TypeTag::String => matches!(value, JsonValue::String(_)),
            TypeTag::Array => matches!(value, JsonValue::Array(_)),
            TypeTag::Object => matches!(value, JsonValue::Object(_)),
        }
    }
}

/// A regex compiled at schema-compile time, keeping its source for
/// error messages.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub source: String,
    pub regex: Regex,
}

impl CompiledPattern {
    /// Regular-expression search, not full match, per JSON Schema semantics.
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// One compiled schema subtree. Every recognized keyword is an explicit
/// optional field; absent means the keyword places no constraint.
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    /// JSON Pointer of this node within the schema document.
    pub schema_path: String,

    /// The boolean `false` schema: rejects every value.
    pub reject_all: bool,

    // --- generic ---
    pub types: Option<Vec<TypeTag>>,
    pub enum_values: Option<Vec<JsonValue>>,
    pub const_value: Option<JsonValue>,

    // --- numeric ---
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
    pub multiple_of: Option<f64>,

    // --- string ---
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<CompiledPattern>,

    // --- array ---
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,
    pub prefix_items: Option<Vec<NodeId>>,
    pub items: Option<NodeId>,
    pub contains: Option<NodeId>,

    // --- object ---
    pub required: Option<Vec<String>>,
    pub properties: Option<Vec<(String, NodeId)>>,
    pub pattern_properties: Option<Vec<(CompiledPattern, NodeId)>>,
    pub additional_properties: Option<NodeId>,

    // --- composition ---
    pub all_of: Option<Vec<NodeId>>,
    pub any_of: Option<Vec<NodeId>>,
    pub one_of: Option<Vec<NodeId>>,
    pub not: Option<NodeId>,

    // --- conditional ---
    pub if_schema: Option<NodeId>,
    pub then_schema: Option<NodeId>,
    pub else_schema: Option<NodeId>,

    /// Resolved `$ref` target, filled in by the resolution pass.
    pub reference: Option<NodeId>,
}

impl SchemaNode {
    pub fn at(schema_path: impl Into<String>) -> Self {
        Self {
            schema_path: schema_path.into(),
            ..Self::default()
        }
    }
}

/// A fully compiled, immutable schema. Read-only after construction, so
/// any number of validations may run over it concurrently.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    pub(crate) nodes: Vec<SchemaNode>,
    pub(crate) max_depth: usize,
}

impl CompiledSchema {
    /// The root node id is fixed at index 0.
    pub const ROOT: NodeId = 0;

    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
