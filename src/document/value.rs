//! JSON-like value tree
//!
//! Objects are ordered sequences of key/value pairs preserving insertion
//! order. Equality is structural: key order does not matter, and numbers
//! compare by value so that `1` equals `1.0`.

use std::fmt;

/// A numeric value, keeping the integer/float distinction from the input.
///
/// `type: integer` is satisfied by `Int` always, and by `Float` when the
/// fractional part is zero.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Returns the value as an f64 for bound and multiple checks.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// True when the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(f) => f.fract() == 0.0 && f.is_finite(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            // Numeric equality across the int/float split: 1 == 1.0
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// An immutable JSON-like value.
#[derive(Debug, Clone)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    /// Ordered string-keyed mapping; insertion order is preserved but
    /// ignored by equality.
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    /// Returns the type name used in error messages and `type` checks.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Looks up a key in an object value; `None` for other types.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, JsonValue)]> {
        match self {
            JsonValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Structural equality with key-order-insensitive object comparison.
    ///
    /// This is `PartialEq` for every variant except `Object`, where the
    /// derived impl would be order-sensitive, so `PartialEq` is implemented
    /// by hand below and this method exists for readability at call sites.
    pub fn structural_eq(&self, other: &JsonValue) -> bool {
        self == other
    }
}

// Derived PartialEq would compare object entries positionally; key order
// must not matter, so Object gets a by-key comparison.
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
            (JsonValue::Number(a), JsonValue::Number(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter().any(|(k2, v2)| k == k2 && v == v2)
                    })
            }
            _ => false,
        }
    }
}

impl fmt::Display for JsonValue {
    /// Compact JSON rendering, used in error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => write!(f, "null"),
            JsonValue::Bool(b) => write!(f, "{}", b),
            JsonValue::Number(n) => write!(f, "{}", n),
            JsonValue::String(s) => write!(f, "{}", serde_json::Value::from(s.as_str())),
            JsonValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            JsonValue::Object(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", serde_json::Value::from(k.as_str()), v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_equality_across_int_float() {
        assert_eq!(Number::Int(1), Number::Float(1.0));
        assert_ne!(Number::Int(1), Number::Float(1.5));
    }

    #[test]
    fn test_integer_check() {
        assert!(Number::Int(-3).is_integer());
        assert!(Number::Float(2.0).is_integer());
        assert!(!Number::Float(2.5).is_integer());
    }

    #[test]
    fn test_object_equality_ignores_key_order() {
        let a = JsonValue::Object(vec![
            ("a".into(), JsonValue::Number(Number::Int(1))),
            ("b".into(), JsonValue::Bool(true)),
        ]);
        let b = JsonValue::Object(vec![
            ("b".into(), JsonValue::Bool(true)),
            ("a".into(), JsonValue::Number(Number::Float(1.0))),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_object_equality_detects_differences() {
        let a = JsonValue::Object(vec![("a".into(), JsonValue::Null)]);
        let b = JsonValue::Object(vec![("a".into(), JsonValue::Bool(false))]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_is_compact_json() {
        let v = JsonValue::Array(vec![
            JsonValue::String("x\"y".into()),
            JsonValue::Object(vec![("k".into(), JsonValue::Null)]),
        ]);
        assert_eq!(v.to_string(), r#"["x\"y",{"k":null}]"#);
    }
}
