//! Platform manager: instantiates connections and things from settings and
//! owns them for the rest of the process.
//!
//! Bootstrap is strictly two-phase: every connection entry is processed
//! before any thing entry, so a thing may reference any connection of the
//! same batch. Within a phase entries are processed in order and a later
//! entry with an already-used id replaces the earlier instance.
//!
//! Entries that cannot be resolved (unknown factory, missing connection) are
//! skipped with a warning and listed in the returned [`BootstrapReport`].
//! A factory that fails while building aborts the phase.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thinghub_domain::connection::Connection;
use thinghub_domain::error::{NotFoundError, ThingHubError};
use thinghub_domain::id::{ConnectionId, ThingId};
use thinghub_domain::settings::{ConnectionSettings, Settings, ThingSettings};
use thinghub_domain::thing::Thing;

use crate::ports::ThingRepository;
use crate::registry::Registries;

/// Which kind of settings entry a [`Skipped`] record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Connection,
    Thing,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => f.write_str("connection"),
            Self::Thing => f.write_str("thing"),
        }
    }
}

/// Why an entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No factory is registered for the entry's type. Usually the platform
    /// is not enabled.
    UnknownFactory { platform: String, type_name: String },
    /// The thing references a connection that was not created.
    MissingConnection { con_id: ConnectionId },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFactory {
                platform,
                type_name,
            } => write!(
                f,
                "no factory for type `{type_name}`; is platform `{platform}` enabled?"
            ),
            Self::MissingConnection { con_id } => {
                write!(f, "connection `{con_id}` is not available")
            }
        }
    }
}

/// An entry that was not instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub kind: EntryKind,
    pub id: String,
    pub reason: SkipReason,
}

/// Outcome of a bootstrap phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Ids instantiated, in processing order (a replaced id appears twice).
    pub created: Vec<String>,
    /// Ids whose earlier instance was replaced by a later entry.
    pub replaced: Vec<String>,
    pub skipped: Vec<Skipped>,
}

impl BootstrapReport {
    /// Append the results of another phase.
    pub fn merge(&mut self, other: Self) {
        self.created.extend(other.created);
        self.replaced.extend(other.replaced);
        self.skipped.extend(other.skipped);
    }

    fn skip(&mut self, kind: EntryKind, id: &str, reason: SkipReason) {
        self.skipped.push(Skipped {
            kind,
            id: id.to_string(),
            reason,
        });
    }
}

fn construction_error(kind: &'static str, id: &str, err: ThingHubError) -> ThingHubError {
    ThingHubError::Construction {
        kind,
        id: id.to_string(),
        source: Box::new(err),
    }
}

/// Owner of every live connection and thing.
pub struct PlatformManager {
    registries: Registries,
    connections: BTreeMap<ConnectionId, Arc<dyn Connection>>,
    things: BTreeMap<ThingId, Arc<dyn Thing>>,
}

impl PlatformManager {
    /// Create an empty manager resolving factories from `registries`.
    #[must_use]
    pub fn new(registries: Registries) -> Self {
        Self {
            registries,
            connections: BTreeMap::new(),
            things: BTreeMap::new(),
        }
    }

    /// Factories this manager resolves entries against.
    #[must_use]
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Run both bootstrap phases: all connections, then all things.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Construction`] when a factory fails; entries
    /// after the failing one are not processed.
    pub fn bootstrap(&mut self, settings: &Settings) -> Result<BootstrapReport, ThingHubError> {
        let mut report = self.init_connections(&settings.connections)?;
        report.merge(self.init_things(&settings.things)?);
        tracing::info!(
            connections = self.connections.len(),
            things = self.things.len(),
            skipped = report.skipped.len(),
            "bootstrap complete"
        );
        Ok(report)
    }

    /// Instantiate connections from their settings.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Construction`] when a connection factory fails.
    #[tracing::instrument(skip_all, fields(entries = configs.len()))]
    pub fn init_connections(
        &mut self,
        configs: &[ConnectionSettings],
    ) -> Result<BootstrapReport, ThingHubError> {
        let mut report = BootstrapReport::default();

        for item in configs {
            let Some(factory) = self
                .registries
                .connections
                .resolve_factory(&item.con_type, None)
            else {
                tracing::warn!(
                    connection_id = %item.id,
                    platform = %item.platform,
                    con_type = %item.con_type,
                    "failed to create connection: is the platform enabled?"
                );
                report.skip(
                    EntryKind::Connection,
                    item.id.as_str(),
                    SkipReason::UnknownFactory {
                        platform: item.platform.clone(),
                        type_name: item.con_type.clone(),
                    },
                );
                continue;
            };

            let connection = factory
                .build(item.id.clone(), &item.con_params)
                .map_err(|err| construction_error("connection", item.id.as_str(), err))?;

            if self
                .connections
                .insert(item.id.clone(), connection)
                .is_some()
            {
                tracing::debug!(connection_id = %item.id, "connection replaced by later entry");
                report.replaced.push(item.id.to_string());
            }
            report.created.push(item.id.to_string());
        }

        Ok(report)
    }

    /// Instantiate things from their settings, binding each to its connection.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Construction`] when a thing factory fails.
    #[tracing::instrument(skip_all, fields(entries = configs.len()))]
    pub fn init_things(
        &mut self,
        configs: &[ThingSettings],
    ) -> Result<BootstrapReport, ThingHubError> {
        let mut report = BootstrapReport::default();

        for item in configs {
            let factory =
                self.registries
                    .things
                    .resolve_factory(&item.platform, &item.thing_type, None);

            let Some(connection) = self.connections.get(&item.con_id) else {
                tracing::warn!(
                    thing_id = %item.id,
                    con_id = %item.con_id,
                    "failed to create thing: connection is not available"
                );
                report.skip(
                    EntryKind::Thing,
                    item.id.as_str(),
                    SkipReason::MissingConnection {
                        con_id: item.con_id.clone(),
                    },
                );
                continue;
            };

            let Some(factory) = factory else {
                tracing::warn!(
                    thing_id = %item.id,
                    platform = %item.platform,
                    thing_type = %item.thing_type,
                    "failed to create thing: is the platform enabled?"
                );
                report.skip(
                    EntryKind::Thing,
                    item.id.as_str(),
                    SkipReason::UnknownFactory {
                        platform: item.platform.clone(),
                        type_name: item.thing_type.clone(),
                    },
                );
                continue;
            };

            let thing = factory
                .build(Arc::clone(connection), &item.con_params, item.metadata())
                .map_err(|err| construction_error("thing", item.id.as_str(), err))?;

            if self.things.insert(item.id.clone(), thing).is_some() {
                tracing::debug!(thing_id = %item.id, "thing replaced by later entry");
                report.replaced.push(item.id.to_string());
            }
            report.created.push(item.id.to_string());
        }

        Ok(report)
    }

    /// Every thing, ordered by id.
    #[must_use]
    pub fn fetch_all_things(&self) -> Vec<Arc<dyn Thing>> {
        self.things.values().cloned().collect()
    }

    /// Look up a thing by id.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::NotFound`] when no thing has that id.
    pub fn fetch_thing(&self, id: &str) -> Result<Arc<dyn Thing>, ThingHubError> {
        self.things.get(id).cloned().ok_or_else(|| {
            NotFoundError {
                entity: "Thing",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Every connection, ordered by id.
    #[must_use]
    pub fn fetch_all_connections(&self) -> Vec<Arc<dyn Connection>> {
        self.connections.values().cloned().collect()
    }

    /// Look up a connection by id.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::NotFound`] when no connection has that id.
    pub fn fetch_connection(&self, id: &str) -> Result<Arc<dyn Connection>, ThingHubError> {
        self.connections.get(id).cloned().ok_or_else(|| {
            NotFoundError {
                entity: "Connection",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Enable every thing, in id order.
    ///
    /// # Errors
    ///
    /// Stops at the first thing whose `enable` fails and returns that error;
    /// things after it stay in their previous state.
    #[tracing::instrument(skip(self))]
    pub fn enable_all_things(&self) -> Result<(), ThingHubError> {
        for thing in self.things.values() {
            thing.enable()?;
        }
        Ok(())
    }

    /// Disable every thing, in id order.
    ///
    /// # Errors
    ///
    /// Stops at the first thing whose `disable` fails and returns that error.
    #[tracing::instrument(skip(self))]
    pub fn disable_all_things(&self) -> Result<(), ThingHubError> {
        for thing in self.things.values() {
            thing.disable()?;
        }
        Ok(())
    }
}

impl ThingRepository for PlatformManager {
    fn load_all(&self) -> Vec<Arc<dyn Thing>> {
        self.fetch_all_things()
    }

    fn load(&self, id: &str) -> Option<Arc<dyn Thing>> {
        self.things.get(id).cloned()
    }
}

impl fmt::Debug for PlatformManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformManager")
            .field("registries", &self.registries)
            .field("connections", &self.connections.keys().collect::<Vec<_>>())
            .field("things", &self.things.keys().collect::<Vec<_>>())
            .finish()
    }
}
