//! Descriptive metadata attached to a thing at construction time.

use serde::{Deserialize, Serialize};

use crate::error::{ThingHubError, ValidationError};
use crate::id::ThingId;

/// Identity and description of a thing. Immutable once the thing is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThingMetadata {
    pub id: ThingId,
    #[serde(rename = "type")]
    pub thing_type: String,
    pub friendly_name: Option<String>,
    pub placement: String,
}

impl ThingMetadata {
    /// Create a builder for constructing [`ThingMetadata`].
    #[must_use]
    pub fn builder() -> ThingMetadataBuilder {
        ThingMetadataBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Validation`] when `id` or `thing_type` is empty.
    pub fn validate(&self) -> Result<(), ThingHubError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        if self.thing_type.is_empty() {
            return Err(ValidationError::EmptyField("type").into());
        }
        Ok(())
    }

    /// The friendly name when set, the id otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.friendly_name
            .as_deref()
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Step-by-step builder for [`ThingMetadata`].
#[derive(Debug, Default)]
pub struct ThingMetadataBuilder {
    id: Option<ThingId>,
    thing_type: Option<String>,
    friendly_name: Option<String>,
    placement: Option<String>,
}

impl ThingMetadataBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<ThingId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn thing_type(mut self, thing_type: impl Into<String>) -> Self {
        self.thing_type = Some(thing_type.into());
        self
    }

    #[must_use]
    pub fn friendly_name(mut self, friendly_name: impl Into<String>) -> Self {
        self.friendly_name = Some(friendly_name.into());
        self
    }

    #[must_use]
    pub fn placement(mut self, placement: impl Into<String>) -> Self {
        self.placement = Some(placement.into());
        self
    }

    /// Consume the builder, validate, and return the metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::Validation`] if `id` or `thing_type` is
    /// missing or empty.
    pub fn build(self) -> Result<ThingMetadata, ThingHubError> {
        let metadata = ThingMetadata {
            id: self.id.unwrap_or_else(|| ThingId::new("")),
            thing_type: self.thing_type.unwrap_or_default(),
            friendly_name: self.friendly_name,
            placement: self.placement.unwrap_or_default(),
        };
        metadata.validate()?;
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_metadata_when_required_fields_set() {
        let metadata = ThingMetadata::builder()
            .id("t1")
            .thing_type("switch")
            .placement("kitchen")
            .build()
            .unwrap();
        assert_eq!(metadata.id.as_str(), "t1");
        assert_eq!(metadata.placement, "kitchen");
        assert!(metadata.friendly_name.is_none());
    }

    #[test]
    fn should_return_validation_error_when_id_missing() {
        let result = ThingMetadata::builder().thing_type("switch").build();
        assert!(matches!(
            result,
            Err(ThingHubError::Validation(ValidationError::EmptyId))
        ));
    }

    #[test]
    fn should_return_validation_error_when_type_missing() {
        let result = ThingMetadata::builder().id("t1").build();
        assert!(matches!(
            result,
            Err(ThingHubError::Validation(ValidationError::EmptyField("type")))
        ));
    }

    #[test]
    fn should_fall_back_to_id_for_display_name() {
        let plain = ThingMetadata::builder()
            .id("t1")
            .thing_type("light")
            .build()
            .unwrap();
        assert_eq!(plain.display_name(), "t1");

        let named = ThingMetadata::builder()
            .id("t1")
            .thing_type("light")
            .friendly_name("Ceiling")
            .build()
            .unwrap();
        assert_eq!(named.display_name(), "Ceiling");
    }

    #[test]
    fn should_serialize_type_field_name() {
        let metadata = ThingMetadata::builder()
            .id("t1")
            .thing_type("sensor")
            .placement("hall")
            .build()
            .unwrap();
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["type"], "sensor");
        assert_eq!(json["id"], "t1");
    }
}
