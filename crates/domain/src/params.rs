//! Free-form keyword parameters.
//!
//! Used both for platform construction parameters (`con_params`) and for
//! actuator command arguments.

use serde_json::Value;

use crate::error::ValidationError;

/// A mapping of keyword arguments.
pub type Params = serde_json::Map<String, Value>;

/// Typed accessors over [`Params`].
///
/// Every accessor returns `Ok(None)` when the key is absent and a
/// [`ValidationError::InvalidParameter`] when it is present with the wrong
/// type.
pub trait ParamsExt {
    /// Read an optional boolean.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] if the value is not a boolean.
    fn opt_bool(&self, key: &str) -> Result<Option<bool>, ValidationError>;

    /// Read an optional floating-point number (integers are accepted).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] if the value is not a number.
    fn opt_f64(&self, key: &str) -> Result<Option<f64>, ValidationError>;

    /// Read an optional non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] if the value is not an
    /// unsigned integer.
    fn opt_u64(&self, key: &str) -> Result<Option<u64>, ValidationError>;

    /// Read an optional string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] if the value is not a string.
    fn opt_str(&self, key: &str) -> Result<Option<&str>, ValidationError>;
}

fn invalid(key: &str, expected: &str) -> ValidationError {
    ValidationError::InvalidParameter {
        name: key.to_string(),
        reason: format!("expected {expected}"),
    }
}

impl ParamsExt for Params {
    fn opt_bool(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        self.get(key)
            .map(|v| v.as_bool().ok_or_else(|| invalid(key, "a boolean")))
            .transpose()
    }

    fn opt_f64(&self, key: &str) -> Result<Option<f64>, ValidationError> {
        self.get(key)
            .map(|v| v.as_f64().ok_or_else(|| invalid(key, "a number")))
            .transpose()
    }

    fn opt_u64(&self, key: &str) -> Result<Option<u64>, ValidationError> {
        self.get(key)
            .map(|v| v.as_u64().ok_or_else(|| invalid(key, "a non-negative integer")))
            .transpose()
    }

    fn opt_str(&self, key: &str) -> Result<Option<&str>, ValidationError> {
        self.get(key)
            .map(|v| v.as_str().ok_or_else(|| invalid(key, "a string")))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test helper expects an object"),
        }
    }

    #[test]
    fn should_return_none_when_key_is_absent() {
        let p = Params::new();
        assert_eq!(p.opt_bool("alive"), Ok(None));
        assert_eq!(p.opt_str("host"), Ok(None));
    }

    #[test]
    fn should_read_typed_values() {
        let p = params(serde_json::json!({
            "alive": false,
            "temperature": 19.5,
            "brightness": 40,
            "host": "10.0.0.2",
        }));
        assert_eq!(p.opt_bool("alive"), Ok(Some(false)));
        assert_eq!(p.opt_f64("temperature"), Ok(Some(19.5)));
        assert_eq!(p.opt_u64("brightness"), Ok(Some(40)));
        assert_eq!(p.opt_str("host"), Ok(Some("10.0.0.2")));
    }

    #[test]
    fn should_accept_integer_as_float() {
        let p = params(serde_json::json!({ "temperature": 20 }));
        assert_eq!(p.opt_f64("temperature"), Ok(Some(20.0)));
    }

    #[test]
    fn should_reject_wrong_type() {
        let p = params(serde_json::json!({ "brightness": -3 }));
        assert!(matches!(
            p.opt_u64("brightness"),
            Err(ValidationError::InvalidParameter { name, .. }) if name == "brightness"
        ));
    }
}
