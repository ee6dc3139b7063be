//! Simulated devices: switch, light, sensor.
//!
//! Each device keeps its state in memory behind a [`Mutex`]; a poisoned lock
//! is recovered rather than propagated since the guarded data is plain values.

mod light;
mod sensor;
mod switch;

pub use light::{DemoLight, MAX_BRIGHTNESS};
pub use sensor::DemoSensor;
pub use switch::DemoSwitch;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thinghub_domain::capability::ThingState;
use thinghub_domain::connection::Connection;
use thinghub_domain::error::ThingHubError;
use thinghub_domain::metadata::ThingMetadata;
use thinghub_domain::time::{Timestamp, now};

/// What every demo device shares: metadata, its connection and the
/// enabled flag.
#[derive(Debug)]
struct Binding {
    metadata: ThingMetadata,
    connection: Arc<dyn Connection>,
    enabled: AtomicBool,
}

impl Binding {
    fn new(connection: Arc<dyn Connection>, metadata: ThingMetadata) -> Self {
        Self {
            metadata,
            connection,
            enabled: AtomicBool::new(false),
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn enable(&self) -> Result<(), ThingHubError> {
        if !self.connection.is_alive() {
            return Err(ThingHubError::ConnectionUnavailable(
                self.connection.id().clone(),
            ));
        }
        self.enabled.store(true, Ordering::SeqCst);
        tracing::debug!(thing_id = %self.metadata.id, "thing enabled");
        Ok(())
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        tracing::debug!(thing_id = %self.metadata.id, "thing disabled");
    }
}

/// On/off state plus the time it last changed.
#[derive(Debug)]
struct Power {
    state: ThingState,
    last_changed: Option<Timestamp>,
}

impl Power {
    fn new(state: ThingState) -> Self {
        Self {
            state,
            last_changed: None,
        }
    }

    /// Move to `state`, stamping the change time only on an actual change.
    fn set(&mut self, state: ThingState) {
        if self.state != state {
            self.state = state;
            self.last_changed = Some(now());
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
