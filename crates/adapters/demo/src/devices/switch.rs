//! Demo switch: responds to `activate`, `deactivate`, `toggle`.

use std::sync::{Arc, Mutex};

use thinghub_domain::capability::{Actuator, State, ThingState};
use thinghub_domain::connection::Connection;
use thinghub_domain::error::ThingHubError;
use thinghub_domain::metadata::ThingMetadata;
use thinghub_domain::params::Params;
use thinghub_domain::thing::Thing;
use thinghub_domain::time::Timestamp;

use super::{Binding, Power, lock};

/// A simulated on/off switch. Starts inactive.
#[derive(Debug)]
pub struct DemoSwitch {
    binding: Binding,
    power: Mutex<Power>,
}

impl DemoSwitch {
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>, metadata: ThingMetadata) -> Self {
        Self {
            binding: Binding::new(connection, metadata),
            power: Mutex::new(Power::new(ThingState::Inactive)),
        }
    }

    /// Thing factory registered under `(demo, switch)`. Takes no parameters.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the factory contract.
    pub fn build(
        connection: Arc<dyn Connection>,
        _params: &Params,
        metadata: ThingMetadata,
    ) -> Result<Arc<dyn Thing>, ThingHubError> {
        Ok(Arc::new(Self::new(connection, metadata)))
    }
}

impl Thing for DemoSwitch {
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

impl State for DemoSwitch {
    fn state(&self) -> ThingState {
        lock(&self.power).state
    }

    fn last_changed(&self) -> Option<Timestamp> {
        lock(&self.power).last_changed
    }
}

impl Actuator for DemoSwitch {
    fn activate(&self) -> Result<(), ThingHubError> {
        lock(&self.power).set(ThingState::Active);
        Ok(())
    }

    fn deactivate(&self) -> Result<(), ThingHubError> {
        lock(&self.power).set(ThingState::Inactive);
        Ok(())
    }
}
