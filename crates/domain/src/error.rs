//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ThingHubError`] via `#[from]` or an explicit `into_domain`.

use crate::capability::Capability;
use crate::id::{ConnectionId, ThingId};

/// Boxed source error carried by [`ThingHubError::Construction`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error of the device core.
#[derive(Debug, thiserror::Error)]
pub enum ThingHubError {
    /// A domain invariant or platform parameter check failed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A lookup by id found nothing.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The command is not part of the actuator's command set.
    #[error("unsupported command `{command}`")]
    UnsupportedCommand { command: String },

    /// The arguments do not match the shape the command expects.
    #[error("invalid arguments for command `{command}`: {reason}")]
    InvalidArguments { command: String, reason: String },

    /// The thing does not implement the requested capability.
    #[error("thing {thing} does not implement the {capability} capability")]
    NotCapable {
        thing: ThingId,
        capability: Capability,
    },

    /// The connection a thing depends on is not usable.
    #[error("connection {0} is unavailable")]
    ConnectionUnavailable(ConnectionId),

    /// A platform factory failed while building a connection or thing.
    #[error("failed to construct {kind} {id}")]
    Construction {
        kind: &'static str,
        id: String,
        #[source]
        source: BoxError,
    },
}

impl ThingHubError {
    /// Shorthand for [`ThingHubError::UnsupportedCommand`].
    #[must_use]
    pub fn unsupported_command(command: &str) -> Self {
        Self::UnsupportedCommand {
            command: command.to_string(),
        }
    }

    /// Shorthand for [`ThingHubError::InvalidArguments`].
    #[must_use]
    pub fn invalid_arguments(command: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

/// Invariant violations detected while building domain values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("parameter `{name}` is invalid: {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Lookup failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = ThingHubError::from(NotFoundError {
            entity: "Thing",
            id: "t1".to_string(),
        });
        assert_eq!(err.to_string(), "Thing `t1` not found");
    }

    #[test]
    fn should_convert_validation_error_with_from() {
        let err: ThingHubError = ValidationError::EmptyId.into();
        assert!(matches!(
            err,
            ThingHubError::Validation(ValidationError::EmptyId)
        ));
    }

    #[test]
    fn should_display_invalid_arguments_reason() {
        let err = ThingHubError::invalid_arguments("toggle", "takes no arguments");
        assert_eq!(
            err.to_string(),
            "invalid arguments for command `toggle`: takes no arguments"
        );
    }

    #[test]
    fn should_expose_construction_source() {
        let err = ThingHubError::Construction {
            kind: "connection",
            id: "c1".to_string(),
            source: Box::new(ValidationError::EmptyField("host")),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "field `host` must not be empty");
    }
}
