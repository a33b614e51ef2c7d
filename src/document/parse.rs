//! Parse adapters from raw text to the document model
//!
//! Byte-level parsing is delegated to serde_json and serde_yaml; this
//! module converts their trees into [`JsonValue`] so that the compiler and
//! evaluator see one shape regardless of input format.

use super::errors::ParseError;
use super::value::{JsonValue, Number};

/// Parses a JSON document into the document model.
pub fn parse_json(input: &str) -> Result<JsonValue, ParseError> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|e| ParseError::new(e.line(), e.column(), e.to_string()))?;
    Ok(from_json(value))
}

/// Parses a YAML document into the document model.
///
/// Equivalent YAML and JSON inputs produce identical trees.
pub fn parse_yaml(input: &str) -> Result<JsonValue, ParseError> {
    let value: serde_yaml::Value = serde_yaml::from_str(input).map_err(|e| {
        let (line, column) = e
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((0, 0));
        ParseError::new(line, column, e.to_string())
    })?;
    from_yaml(value)
}

fn from_json(value: serde_json::Value) -> JsonValue {
    match value {
        serde_json::Value::Null => JsonValue::Null,
        serde_json::Value::Bool(b) => JsonValue::Bool(b),
        serde_json::Value::Number(n) => JsonValue::Number(convert_json_number(&n)),
        serde_json::Value::String(s) => JsonValue::String(s),
        serde_json::Value::Array(items) => {
            JsonValue::Array(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(entries) => JsonValue::Object(
            entries.into_iter().map(|(k, v)| (k, from_json(v))).collect(),
        ),
    }
}

fn convert_json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Int(i)
    } else {
        // u64 beyond i64::MAX or a float; both carry as f64
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<JsonValue, ParseError> {
    match value {
        serde_yaml::Value::Null => Ok(JsonValue::Null),
        serde_yaml::Value::Bool(b) => Ok(JsonValue::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(JsonValue::Number(Number::Int(i)))
            } else {
                Ok(JsonValue::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))))
            }
        }
        serde_yaml::Value::String(s) => Ok(JsonValue::String(s)),
        serde_yaml::Value::Sequence(items) => Ok(JsonValue::Array(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        serde_yaml::Value::Mapping(entries) => {
            let mut converted = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                // JSON-equivalent documents only: mapping keys must be strings
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    other => {
                        return Err(ParseError::new(
                            0,
                            0,
                            format!("mapping key must be a string, found {:?}", other),
                        ))
                    }
                };
                converted.push((key, from_yaml(v)?));
            }
            Ok(JsonValue::Object(converted))
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_and_yaml_produce_identical_trees() {
        let json = parse_json(r#"{"name": "a", "count": 3, "ratio": 0.5}"#).unwrap();
        let yaml = parse_yaml("name: a\ncount: 3\nratio: 0.5\n").unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_integer_and_float_are_distinguished() {
        let doc = parse_json("[1, 1.0]").unwrap();
        let items = doc.as_array().unwrap();
        assert!(matches!(items[0], JsonValue::Number(Number::Int(1))));
        assert!(matches!(items[1], JsonValue::Number(Number::Float(_))));
    }

    #[test]
    fn test_object_insertion_order_is_preserved() {
        let doc = parse_json(r#"{"z": 1, "a": 2}"#).unwrap();
        let keys: Vec<&str> = doc
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_malformed_json_reports_position() {
        let err = parse_json("{\n  \"a\": }").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.column > 0);
    }

    #[test]
    fn test_non_string_yaml_key_is_rejected() {
        let err = parse_yaml("1: x\n").unwrap_err();
        assert!(err.message.contains("string"));
    }
}
