//! Demo light: a switch with a dimmable brightness level.

use std::sync::{Arc, Mutex};

use thinghub_domain::capability::{
    Actuator, AttributeValue, Attributes, BASE_COMMANDS, State, ThingState,
};
use thinghub_domain::connection::Connection;
use thinghub_domain::error::{ThingHubError, ValidationError};
use thinghub_domain::metadata::ThingMetadata;
use thinghub_domain::params::{Params, ParamsExt};
use thinghub_domain::thing::Thing;
use thinghub_domain::time::Timestamp;

use super::{Binding, Power, lock};

/// Upper bound of the brightness scale.
pub const MAX_BRIGHTNESS: u8 = 100;

const SET_BRIGHTNESS: &str = "set_brightness";

#[derive(Debug)]
struct LightState {
    power: Power,
    brightness: u8,
}

/// A simulated dimmable light. Starts inactive at full brightness unless
/// `con_params.brightness` says otherwise.
#[derive(Debug)]
pub struct DemoLight {
    binding: Binding,
    inner: Mutex<LightState>,
}

fn parse_brightness(params: &Params) -> Result<Option<u8>, ValidationError> {
    let Some(raw) = params.opt_u64("brightness")? else {
        return Ok(None);
    };
    u8::try_from(raw)
        .ok()
        .filter(|level| *level <= MAX_BRIGHTNESS)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidParameter {
            name: "brightness".to_string(),
            reason: format!("expected 0..={MAX_BRIGHTNESS}, got {raw}"),
        })
}

impl DemoLight {
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>, metadata: ThingMetadata, brightness: u8) -> Self {
        Self {
            binding: Binding::new(connection, metadata),
            inner: Mutex::new(LightState {
                power: Power::new(ThingState::Inactive),
                brightness: brightness.min(MAX_BRIGHTNESS),
            }),
        }
    }

    /// Thing factory registered under `(demo, light)`.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Validation`] when `brightness` is not an
    /// integer in `0..=100`.
    pub fn build(
        connection: Arc<dyn Connection>,
        params: &Params,
        metadata: ThingMetadata,
    ) -> Result<Arc<dyn Thing>, ThingHubError> {
        let brightness = parse_brightness(params)?.unwrap_or(MAX_BRIGHTNESS);
        Ok(Arc::new(Self::new(connection, metadata, brightness)))
    }

    #[must_use]
    pub fn brightness(&self) -> u8 {
        lock(&self.inner).brightness
    }

    /// Set the brightness level. A level of zero switches the light off,
    /// any other level switches it on.
    fn set_brightness(&self, args: &Params) -> Result<(), ThingHubError> {
        if let Some(extra) = args.keys().find(|key| key.as_str() != "brightness") {
            return Err(ThingHubError::invalid_arguments(
                SET_BRIGHTNESS,
                format!("unexpected argument `{extra}`"),
            ));
        }
        let level = parse_brightness(args)
            .map_err(|err| ThingHubError::invalid_arguments(SET_BRIGHTNESS, err.to_string()))?
            .ok_or_else(|| {
                ThingHubError::invalid_arguments(SET_BRIGHTNESS, "missing `brightness`")
            })?;
        let mut inner = lock(&self.inner);
        inner.brightness = level;
        inner.power.set(if level == 0 {
            ThingState::Inactive
        } else {
            ThingState::Active
        });
        Ok(())
    }
}

impl Thing for DemoLight {
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

    fn as_actuator(&self) -> Option<&dyn Actuator> {
        Some(self)
    }
}

impl State for DemoLight {
    fn state(&self) -> ThingState {
        lock(&self.inner).power.state
    }

    fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            "brightness".to_string(),
            AttributeValue::Int(i64::from(self.brightness())),
        );
        attributes
    }

    fn last_changed(&self) -> Option<Timestamp> {
        lock(&self.inner).power.last_changed
    }
}

impl Actuator for DemoLight {
    fn commands(&self) -> Vec<&'static str> {
        let mut commands = BASE_COMMANDS.to_vec();
        commands.push(SET_BRIGHTNESS);
        commands
    }

    /// Switch on. A light dimmed to zero comes back at full brightness.
    fn activate(&self) -> Result<(), ThingHubError> {
        let mut inner = lock(&self.inner);
        if inner.brightness == 0 {
            inner.brightness = MAX_BRIGHTNESS;
        }
        inner.power.set(ThingState::Active);
        Ok(())
    }

    fn deactivate(&self) -> Result<(), ThingHubError> {
        lock(&self.inner).power.set(ThingState::Inactive);
        Ok(())
    }

    fn execute_custom(&self, command: &str, args: &Params) -> Result<(), ThingHubError> {
        match command {
            SET_BRIGHTNESS => self.set_brightness(args),
            other => Err(ThingHubError::unsupported_command(other)),
        }
    }
}
