//! Mock connection: a transport with a switchable liveness flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thinghub_domain::connection::Connection;
use thinghub_domain::error::ThingHubError;
use thinghub_domain::id::ConnectionId;
use thinghub_domain::params::{Params, ParamsExt};

/// A connection that talks to nothing.
///
/// `con_params`:
///
/// | Key | Type | Default |
/// |-----|------|---------|
/// | `alive` | bool | `true` |
#[derive(Debug)]
pub struct MockConnection {
    id: ConnectionId,
    alive: AtomicBool,
}

impl MockConnection {
    #[must_use]
    pub fn new(id: ConnectionId, alive: bool) -> Self {
        Self {
            id,
            alive: AtomicBool::new(alive),
        }
    }

    /// Simulate the transport going down or coming back.
    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }
}

impl Connection for MockConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

/// Connection factory registered under the `mock` type.
///
/// # Errors
///
/// Returns [`ThingHubError::Validation`] when `alive` is not a boolean.
pub fn build(id: ConnectionId, params: &Params) -> Result<Arc<dyn Connection>, ThingHubError> {
    let alive = params.opt_bool("alive")?.unwrap_or(true);
    tracing::debug!(connection_id = %id, alive, "mock connection opened");
    Ok(Arc::new(MockConnection::new(id, alive)))
}
