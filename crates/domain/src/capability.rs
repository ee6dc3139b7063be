//! Capabilities: narrow behavioural contracts a [`Thing`](crate::thing::Thing)
//! may implement.
//!
//! A concrete thing composes whichever capabilities make sense for its device
//! class. Callers never depend on concrete thing types: they ask a thing for
//! its [`CapabilitySet`] or for a capability view (`as_state`, `as_actuator`).

mod actuator;
mod attribute_value;
mod state;

pub use actuator::{Actuator, BASE_COMMANDS};
pub use attribute_value::{AttributeValue, Attributes};
pub use state::{State, StateSnapshot, ThingState};

use std::fmt;

use serde::Serialize;

/// Name of a behavioural interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    State,
    Actuator,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => f.write_str("state"),
            Self::Actuator => f.write_str("actuator"),
        }
    }
}

/// The set of capabilities a thing instance implements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilitySet(Vec<Capability>);

impl CapabilitySet {
    /// An empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a capability, keeping the set sorted and free of duplicates.
    #[must_use]
    pub fn with(mut self, capability: Capability) -> Self {
        if let Err(pos) = self.0.binary_search(&capability) {
            self.0.insert(pos, capability);
        }
        self
    }

    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.binary_search(&capability).is_ok()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, capability) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            capability.fmt(f)?;
        }
        Ok(())
    }
}
