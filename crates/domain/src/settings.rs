//! Declarative settings handed to the core by the configuration layer.
//!
//! These mirror what the (external) settings repositories store: an ordered
//! list of enabled platforms plus one entry per connection and per thing.

use serde::Deserialize;

use crate::error::{ThingHubError, ValidationError};
use crate::id::{ConnectionId, ThingId};
use crate::metadata::ThingMetadata;
use crate::params::Params;

/// One connection to instantiate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectionSettings {
    pub id: ConnectionId,
    pub platform: String,
    pub con_type: String,
    #[serde(default)]
    pub con_params: Params,
}

/// One thing to instantiate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThingSettings {
    pub id: ThingId,
    pub platform: String,
    #[serde(rename = "type")]
    pub thing_type: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    pub placement: String,
    pub con_id: ConnectionId,
    #[serde(default)]
    pub con_params: Params,
}

impl ThingSettings {
    /// Metadata bundle passed to the thing factory.
    #[must_use]
    pub fn metadata(&self) -> ThingMetadata {
        ThingMetadata {
            id: self.id.clone(),
            thing_type: self.thing_type.clone(),
            friendly_name: self.friendly_name.clone(),
            placement: self.placement.clone(),
        }
    }
}

/// Everything needed for one bootstrap pass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Platforms to load, in order.
    pub platforms: Vec<String>,
    pub connections: Vec<ConnectionSettings>,
    pub things: Vec<ThingSettings>,
}

impl Settings {
    /// Check that every entry carries the fields the core keys on.
    ///
    /// Unknown platforms and dangling `con_id` references are *not*
    /// errors here; the platform manager skips and reports them.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Validation`] on the first empty id, platform
    /// or type.
    pub fn validate(&self) -> Result<(), ThingHubError> {
        if self.platforms.iter().any(String::is_empty) {
            return Err(ValidationError::EmptyField("platforms").into());
        }
        for con in &self.connections {
            if con.id.is_empty() {
                return Err(ValidationError::EmptyId.into());
            }
            if con.platform.is_empty() {
                return Err(ValidationError::EmptyField("platform").into());
            }
            if con.con_type.is_empty() {
                return Err(ValidationError::EmptyField("con_type").into());
            }
        }
        for thing in &self.things {
            if thing.platform.is_empty() {
                return Err(ValidationError::EmptyField("platform").into());
            }
            if thing.con_id.is_empty() {
                return Err(ValidationError::EmptyField("con_id").into());
            }
            thing.metadata().validate()?;
        }
        Ok(())
    }
}
