//! Thing: the software representation of one controllable device.
//!
//! A thing is bound to exactly one [`Connection`] at construction and never
//! rebound. Its behaviour is exposed through capabilities: callers ask for
//! [`as_state`](Thing::as_state) / [`as_actuator`](Thing::as_actuator)
//! instead of downcasting to concrete types.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::capability::{Actuator, Capability, CapabilitySet, State, StateSnapshot};
use crate::connection::Connection;
use crate::error::ThingHubError;
use crate::id::ThingId;
use crate::metadata::ThingMetadata;

/// A controllable device.
pub trait Thing: fmt::Debug + Send + Sync {
    /// Descriptive metadata fixed at construction.
    fn metadata(&self) -> &ThingMetadata;

    /// The connection this thing was built with.
    fn connection(&self) -> &Arc<dyn Connection>;

    /// Whether [`enable`](Self::enable) was called more recently than
    /// [`disable`](Self::disable). `false` right after construction.
    fn is_enabled(&self) -> bool;

    /// Start using the device.
    ///
    /// # Errors
    ///
    /// Returns a device-specific error, typically
    /// [`ThingHubError::ConnectionUnavailable`].
    fn enable(&self) -> Result<(), ThingHubError>;

    /// Stop using the device.
    ///
    /// # Errors
    ///
    /// Returns a device-specific error.
    fn disable(&self) -> Result<(), ThingHubError>;

    /// View of the [`State`] capability, if implemented.
    fn as_state(&self) -> Option<&dyn State> {
        None
    }

    /// View of the [`Actuator`] capability, if implemented.
    fn as_actuator(&self) -> Option<&dyn Actuator> {
        None
    }

    fn id(&self) -> &ThingId {
        &self.metadata().id
    }

    /// Capabilities implemented by this instance.
    ///
    /// Derived from the capability views; an actuator always implies state.
    fn capabilities(&self) -> CapabilitySet {
        let mut set = CapabilitySet::empty();
        if self.as_state().is_some() {
            set = set.with(Capability::State);
        }
        if self.as_actuator().is_some() {
            set = set.with(Capability::State).with(Capability::Actuator);
        }
        set
    }

    /// Serializable description of the thing and its current state.
    fn describe(&self) -> ThingView {
        let metadata = self.metadata();
        ThingView {
            id: metadata.id.clone(),
            thing_type: metadata.thing_type.clone(),
            friendly_name: metadata.friendly_name.clone(),
            placement: metadata.placement.clone(),
            connection_id: self.connection().id().to_string(),
            capabilities: self.capabilities(),
            enabled: self.is_enabled(),
            state: self
                .as_actuator()
                .map(|a| a.snapshot())
                .or_else(|| self.as_state().map(|s| s.snapshot())),
            commands: self.as_actuator().map(|a| a.commands()),
        }
    }
}

/// Read model of a thing, as handed to the API layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThingView {
    pub id: ThingId,
    #[serde(rename = "type")]
    pub thing_type: String,
    pub friendly_name: Option<String>,
    pub placement: String,
    pub connection_id: String,
    pub capabilities: CapabilitySet,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<&'static str>>,
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::capability::ThingState;
    use crate::id::ConnectionId;

    #[derive(Debug)]
    struct Loopback {
        id: ConnectionId,
    }

    impl Connection for Loopback {
        fn id(&self) -> &ConnectionId {
            &self.id
        }
    }

    #[derive(Debug)]
    struct Doorbell {
        metadata: ThingMetadata,
        connection: Arc<dyn Connection>,
        enabled: AtomicBool,
    }

    impl Thing for Doorbell {
        fn metadata(&self) -> &ThingMetadata {
            &self.metadata
        }

        fn connection(&self) -> &Arc<dyn Connection> {
            &self.connection
        }

        fn is_enabled(&self) -> bool {
            self.enabled.load(Ordering::SeqCst)
        }

        fn enable(&self) -> Result<(), ThingHubError> {
            self.enabled.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn disable(&self) -> Result<(), ThingHubError> {
            self.enabled.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn as_state(&self) -> Option<&dyn State> {
            Some(self)
        }
    }

    impl State for Doorbell {
        fn state(&self) -> ThingState {
            ThingState::Inactive
        }
    }

    fn doorbell() -> Doorbell {
        Doorbell {
            metadata: ThingMetadata::builder()
                .id("bell")
                .thing_type("doorbell")
                .placement("porch")
                .build()
                .unwrap(),
            connection: Arc::new(Loopback {
                id: ConnectionId::new("lo"),
            }),
            enabled: AtomicBool::new(false),
        }
    }

    #[test]
    fn should_take_id_from_metadata() {
        assert_eq!(doorbell().id().as_str(), "bell");
    }

    #[test]
    fn should_derive_capabilities_from_views() {
        let caps = doorbell().capabilities();
        assert!(caps.contains(Capability::State));
        assert!(!caps.contains(Capability::Actuator));
    }

    #[test]
    fn should_describe_state_without_commands() {
        let bell = doorbell();
        bell.enable().unwrap();
        let view = bell.describe();
        assert!(view.enabled);
        assert_eq!(view.connection_id, "lo");
        assert_eq!(view.state.map(|s| s.state), Some(ThingState::Inactive));
        assert!(view.commands.is_none());
    }

    #[test]
    fn should_omit_commands_when_serializing_non_actuator() {
        let json = serde_json::to_value(doorbell().describe()).unwrap();
        assert_eq!(json["type"], "doorbell");
        assert_eq!(json["capabilities"], serde_json::json!(["state"]));
        assert!(json.get("commands").is_none());
    }
}
