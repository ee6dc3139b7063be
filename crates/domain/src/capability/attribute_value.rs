//! Typed attribute values reported alongside a thing's state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Free-form attributes, ordered by name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_variants_untagged() {
        assert_eq!(serde_json::to_string(&AttributeValue::from(42_i64)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&AttributeValue::from(21.5_f64)).unwrap(), "21.5");
        assert_eq!(serde_json::to_string(&AttributeValue::from(true)).unwrap(), "true");
        assert_eq!(
            serde_json::to_string(&AttributeValue::from("\u{b0}C")).unwrap(),
            "\"\u{b0}C\""
        );
    }

    #[test]
    fn should_deserialize_json_object_as_json_variant() {
        let val: AttributeValue = serde_json::from_str(r#"{"r": 255}"#).unwrap();
        assert!(matches!(val, AttributeValue::Json(_)));
    }
}
