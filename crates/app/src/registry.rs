//! Factory registries: where platforms publish how to build their
//! connections and things.
//!
//! Registration is append-or-overwrite: registering a key twice keeps the
//! last factory, so a platform loaded later can override an earlier one
//! (handy for test or replacement platforms). Lookups never fail; a missing
//! key yields the caller-supplied default.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thinghub_domain::connection::Connection;
use thinghub_domain::error::ThingHubError;
use thinghub_domain::id::ConnectionId;
use thinghub_domain::metadata::ThingMetadata;
use thinghub_domain::params::Params;
use thinghub_domain::thing::Thing;

/// Builds a [`Connection`] from its id and platform-specific parameters.
///
/// Implemented for any `Fn(ConnectionId, &Params) -> Result<Arc<dyn Connection>, _>`.
pub trait ConnectionFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when `params` are invalid or the transport cannot be
    /// opened.
    fn build(
        &self,
        id: ConnectionId,
        params: &Params,
    ) -> Result<Arc<dyn Connection>, ThingHubError>;
}

impl<F> ConnectionFactory for F
where
    F: Fn(ConnectionId, &Params) -> Result<Arc<dyn Connection>, ThingHubError> + Send + Sync,
{
    fn build(
        &self,
        id: ConnectionId,
        params: &Params,
    ) -> Result<Arc<dyn Connection>, ThingHubError> {
        self(id, params)
    }
}

/// Builds a [`Thing`] bound to an existing connection.
///
/// Implemented for any
/// `Fn(Arc<dyn Connection>, &Params, ThingMetadata) -> Result<Arc<dyn Thing>, _>`.
pub trait ThingFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when `params` are invalid for this thing type.
    fn build(
        &self,
        connection: Arc<dyn Connection>,
        params: &Params,
        metadata: ThingMetadata,
    ) -> Result<Arc<dyn Thing>, ThingHubError>;
}

impl<F> ThingFactory for F
where
    F: Fn(Arc<dyn Connection>, &Params, ThingMetadata) -> Result<Arc<dyn Thing>, ThingHubError>
        + Send
        + Sync,
{
    fn build(
        &self,
        connection: Arc<dyn Connection>,
        params: &Params,
        metadata: ThingMetadata,
    ) -> Result<Arc<dyn Thing>, ThingHubError> {
        self(connection, params, metadata)
    }
}

/// Connection factories keyed by connection type.
#[derive(Default)]
pub struct ConnectionRegistry {
    factories: HashMap<String, Arc<dyn ConnectionFactory>>,
}

impl ConnectionRegistry {
    /// Register `factory` under `con_type`, replacing any previous one.
    pub fn register(
        &mut self,
        con_type: impl Into<String>,
        factory: impl ConnectionFactory + 'static,
    ) {
        let con_type = con_type.into();
        let replaced = self
            .factories
            .insert(con_type.clone(), Arc::new(factory))
            .is_some();
        if replaced {
            tracing::debug!(con_type = %con_type, "connection factory overridden");
        }
    }

    /// Look up the factory for `con_type`, falling back to `default`.
    #[must_use]
    pub fn resolve_factory(
        &self,
        con_type: &str,
        default: Option<Arc<dyn ConnectionFactory>>,
    ) -> Option<Arc<dyn ConnectionFactory>> {
        self.factories.get(con_type).cloned().or(default)
    }

    #[must_use]
    pub fn contains(&self, con_type: &str) -> bool {
        self.factories.contains_key(con_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ConnectionRegistry")
            .field("con_types", &keys)
            .finish()
    }
}

/// Thing factories keyed by `(platform, thing type)`.
#[derive(Default)]
pub struct ThingRegistry {
    factories: HashMap<String, HashMap<String, Arc<dyn ThingFactory>>>,
}

impl ThingRegistry {
    /// Register `factory` under `(platform, thing_type)`, replacing any
    /// previous one.
    pub fn register(
        &mut self,
        platform: impl Into<String>,
        thing_type: impl Into<String>,
        factory: impl ThingFactory + 'static,
    ) {
        let platform = platform.into();
        let thing_type = thing_type.into();
        let replaced = self
            .factories
            .entry(platform.clone())
            .or_default()
            .insert(thing_type.clone(), Arc::new(factory))
            .is_some();
        if replaced {
            tracing::debug!(%platform, %thing_type, "thing factory overridden");
        }
    }

    /// Look up the factory for `(platform, thing_type)`, falling back to
    /// `default`.
    #[must_use]
    pub fn resolve_factory(
        &self,
        platform: &str,
        thing_type: &str,
        default: Option<Arc<dyn ThingFactory>>,
    ) -> Option<Arc<dyn ThingFactory>> {
        self.factories
            .get(platform)
            .and_then(|types| types.get(thing_type))
            .cloned()
            .or(default)
    }

    #[must_use]
    pub fn contains(&self, platform: &str, thing_type: &str) -> bool {
        self.factories
            .get(platform)
            .is_some_and(|types| types.contains_key(thing_type))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ThingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<(&str, &str)> = self
            .factories
            .iter()
            .flat_map(|(platform, types)| {
                types
                    .keys()
                    .map(move |thing_type| (platform.as_str(), thing_type.as_str()))
            })
            .collect();
        keys.sort_unstable();
        f.debug_struct("ThingRegistry").field("keys", &keys).finish()
    }
}

/// Both registries, owned by the composition root and filled by platforms.
#[derive(Debug, Default)]
pub struct Registries {
    pub connections: ConnectionRegistry,
    pub things: ThingRegistry,
}
