//! Caller-assigned identifier newtypes.
//!
//! Connection and thing ids come from configuration, so they are plain
//! strings rather than generated values.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier without validating it.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Err(ValidationError::EmptyId);
                }
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Connection`](crate::connection::Connection).
    ConnectionId
);

define_id!(
    /// Unique identifier for a [`Thing`](crate::thing::Thing).
    ThingId
);

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    #[test]
    fn should_display_inner_string() {
        let id = ThingId::new("kitchen_switch");
        assert_eq!(id.to_string(), "kitchen_switch");
    }

    #[test]
    fn should_reject_empty_string_when_parsing() {
        let result = ConnectionId::from_str("");
        assert_eq!(result, Err(ValidationError::EmptyId));
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = ConnectionId::new("c1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"c1\"");
        let parsed: ConnectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_allow_map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ThingId::new("t1"), 1);
        assert_eq!(map.get("t1"), Some(&1));
    }
}
