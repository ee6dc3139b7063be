//! The base `State` capability.

use serde::{Deserialize, Serialize};

use super::attribute_value::Attributes;
use crate::time::Timestamp;

/// Coarse operational state of a thing.
///
/// What "active" means is device-specific (powered on, open, playing, …);
/// `Unknown` covers devices that have not reported yet or cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThingState {
    Active,
    Inactive,
    #[default]
    Unknown,
}

impl ThingState {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn is_inactive(self) -> bool {
        matches!(self, Self::Inactive)
    }
}

impl std::fmt::Display for ThingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Inactive => f.write_str("inactive"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Point-in-time view of a thing's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub state: ThingState,
    pub attributes: Attributes,
    pub last_changed: Option<Timestamp>,
}

/// Read-only access to the current state of a thing.
pub trait State: Send + Sync {
    /// The current coarse state.
    fn state(&self) -> ThingState;

    /// Device-specific attributes (temperature, brightness, …).
    fn attributes(&self) -> Attributes {
        Attributes::new()
    }

    /// When the state last changed, if the device tracks it.
    fn last_changed(&self) -> Option<Timestamp> {
        None
    }

    /// Collect state, attributes and change time in one value.
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            state: self.state(),
            attributes: self.attributes(),
            last_changed: self.last_changed(),
        }
    }
}
