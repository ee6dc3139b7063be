//! # thinghub-adapter-demo
//!
//! The `demo` platform: a mock transport and simulated devices for testing
//! and demonstration.
//!
//! ## Provided factories
//!
//! | Kind | Key | Builds |
//! |------|-----|--------|
//! | Connection | `mock` | [`MockConnection`] |
//! | Thing | `(demo, switch)` | [`DemoSwitch`], responds to `activate` / `deactivate` / `toggle` |
//! | Thing | `(demo, light)` | [`DemoLight`], adds `set_brightness` |
//! | Thing | `(demo, sensor)` | [`DemoSensor`], holds a temperature attribute |
//!
//! ## Dependency rule
//!
//! Depends on `thinghub-app` (platform and registry traits) and
//! `thinghub-domain` only.

mod connection;
mod devices;

use thinghub_app::platform::Platform;
use thinghub_app::registry::Registries;
use thinghub_domain::error::ThingHubError;

pub use connection::MockConnection;
pub use devices::{DemoLight, DemoSensor, DemoSwitch, MAX_BRIGHTNESS};

/// Name configuration uses to enable this platform.
pub const PLATFORM_NAME: &str = "demo";

/// Connection type served by [`MockConnection`].
pub const MOCK_CONNECTION: &str = "mock";

/// The demo platform entry point.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoPlatform;

impl Platform for DemoPlatform {
    fn name(&self) -> &'static str {
        PLATFORM_NAME
    }

    fn register(&self, registries: &mut Registries) -> Result<(), ThingHubError> {
        registries
            .connections
            .register(MOCK_CONNECTION, connection::build);
        registries
            .things
            .register(PLATFORM_NAME, "switch", DemoSwitch::build);
        registries
            .things
            .register(PLATFORM_NAME, "light", DemoLight::build);
        registries
            .things
            .register(PLATFORM_NAME, "sensor", DemoSensor::build);
        Ok(())
    }
}
