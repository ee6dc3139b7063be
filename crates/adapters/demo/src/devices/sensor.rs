//! Demo temperature sensor: holds a reading as attributes.

use std::sync::Arc;

use thinghub_domain::capability::{AttributeValue, Attributes, State, ThingState};
use thinghub_domain::connection::Connection;
use thinghub_domain::error::ThingHubError;
use thinghub_domain::metadata::ThingMetadata;
use thinghub_domain::params::{Params, ParamsExt};
use thinghub_domain::thing::Thing;

use super::Binding;

const DEFAULT_TEMPERATURE: f64 = 21.5;

/// A simulated temperature sensor.
///
/// Sensors are not actuators: they only expose read-only attributes
/// (`temperature`, `unit`) and report an `Unknown` coarse state.
#[derive(Debug)]
pub struct DemoSensor {
    binding: Binding,
    temperature: f64,
}

impl DemoSensor {
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>, metadata: ThingMetadata, temperature: f64) -> Self {
        Self {
            binding: Binding::new(connection, metadata),
            temperature,
        }
    }

    /// Thing factory registered under `(demo, sensor)`.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Validation`] when `temperature` is not a number.
    pub fn build(
        connection: Arc<dyn Connection>,
        params: &Params,
        metadata: ThingMetadata,
    ) -> Result<Arc<dyn Thing>, ThingHubError> {
        let temperature = params
            .opt_f64("temperature")?
            .unwrap_or(DEFAULT_TEMPERATURE);
        Ok(Arc::new(Self::new(connection, metadata, temperature)))
    }
}

impl Thing for DemoSensor {
    fn metadata(&self) -> &ThingMetadata {
        &self.binding.metadata
    }

    fn connection(&self) -> &Arc<dyn Connection> {
        &self.binding.connection
    }

    fn is_enabled(&self) -> bool {
        self.binding.is_enabled()
    }

    fn enable(&self) -> Result<(), ThingHubError> {
        self.binding.enable()
    }

    fn disable(&self) -> Result<(), ThingHubError> {
        self.binding.disable();
        Ok(())
    }

    fn as_state(&self) -> Option<&dyn State> {
        Some(self)
    }
}

impl State for DemoSensor {
    fn state(&self) -> ThingState {
        ThingState::Unknown
    }

    fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            "temperature".to_string(),
            AttributeValue::Float(self.temperature),
        );
        attributes.insert("unit".to_string(), AttributeValue::from("\u{b0}C"));
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MockConnection;
    use thinghub_domain::capability::Capability;
    use thinghub_domain::id::ConnectionId;

    fn sensor(con_params: serde_json::Value) -> Result<Arc<dyn Thing>, ThingHubError> {
        let connection = Arc::new(MockConnection::new(ConnectionId::new("c1"), true));
        let metadata = ThingMetadata::builder()
            .id("thermo")
            .thing_type("sensor")
            .placement("hall")
            .build()
            .unwrap();
        DemoSensor::build(
            connection,
            con_params.as_object().unwrap_or(&Params::new()),
            metadata,
        )
    }

    #[test]
    fn should_default_to_unknown_state() {
        let sensor = sensor(serde_json::json!({})).unwrap();
        assert_eq!(sensor.as_state().unwrap().state(), ThingState::Unknown);
    }

    #[test]
    fn should_have_default_temperature_and_unit() {
        let attributes = sensor(serde_json::json!({}))
            .unwrap()
            .as_state()
            .unwrap()
            .attributes();
        assert_eq!(
            attributes.get("temperature"),
            Some(&AttributeValue::Float(21.5))
        );
        assert_eq!(
            attributes.get("unit"),
            Some(&AttributeValue::String("\u{b0}C".to_string()))
        );
    }

    #[test]
    fn should_take_temperature_from_params() {
        let sensor = sensor(serde_json::json!({ "temperature": 18 })).unwrap();
        assert_eq!(
            sensor.as_state().unwrap().attributes().get("temperature"),
            Some(&AttributeValue::Float(18.0))
        );
    }

    #[test]
    fn should_fail_construction_when_temperature_not_a_number() {
        let result = sensor(serde_json::json!({ "temperature": "warm" }));
        assert!(matches!(result, Err(ThingHubError::Validation(_))));
    }

    #[test]
    fn should_not_be_an_actuator() {
        let sensor = sensor(serde_json::json!({})).unwrap();
        assert!(sensor.as_actuator().is_none());
        assert!(!sensor.capabilities().contains(Capability::Actuator));
        assert!(sensor.describe().commands.is_none());
    }
}
