//! The `Actuator` capability: things that act on the real world.

use super::state::State;
use crate::error::ThingHubError;
use crate::params::Params;

/// Commands every actuator must accept.
pub const BASE_COMMANDS: [&str; 3] = ["activate", "deactivate", "toggle"];

/// A thing that can be switched between active and inactive states and
/// accepts named commands.
///
/// Implementors provide [`activate`](Self::activate) and
/// [`deactivate`](Self::deactivate); command dispatch and toggling have
/// default implementations built on top of them.
pub trait Actuator: State {
    /// Names of the commands this instance accepts.
    ///
    /// Always contains [`BASE_COMMANDS`]. Implementations adding commands
    /// must keep them and handle the extras in
    /// [`execute_custom`](Self::execute_custom).
    fn commands(&self) -> Vec<&'static str> {
        BASE_COMMANDS.to_vec()
    }

    /// Move to one of the active states. No-op when already active.
    ///
    /// # Errors
    ///
    /// Returns a device-specific error when the device cannot be reached.
    fn activate(&self) -> Result<(), ThingHubError>;

    /// Move to one of the inactive states. No-op when already inactive.
    ///
    /// # Errors
    ///
    /// Returns a device-specific error when the device cannot be reached.
    fn deactivate(&self) -> Result<(), ThingHubError>;

    /// Deactivate when active, otherwise activate.
    ///
    /// `Unknown` is treated as inactive, so toggling a thing in an unknown
    /// state activates it.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying `activate`/`deactivate`.
    fn toggle(&self) -> Result<(), ThingHubError> {
        if self.state().is_active() {
            self.deactivate()
        } else {
            self.activate()
        }
    }

    /// Dispatch a named command with keyword arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ThingHubError::UnsupportedCommand`] when `command` is not in
    /// [`commands`](Self::commands) and [`ThingHubError::InvalidArguments`]
    /// when a base command receives arguments.
    fn execute(&self, command: &str, args: &Params) -> Result<(), ThingHubError> {
        if !self.commands().iter().any(|c| *c == command) {
            return Err(ThingHubError::unsupported_command(command));
        }
        if BASE_COMMANDS.iter().any(|c| *c == command) && !args.is_empty() {
            return Err(ThingHubError::invalid_arguments(
                command,
                "command takes no arguments",
            ));
        }
        match command {
            "activate" => self.activate(),
            "deactivate" => self.deactivate(),
            "toggle" => self.toggle(),
            other => self.execute_custom(other, args),
        }
    }

    /// Handle a command outside [`BASE_COMMANDS`].
    ///
    /// # Errors
    ///
    /// The default rejects everything with [`ThingHubError::UnsupportedCommand`].
    fn execute_custom(&self, command: &str, _args: &Params) -> Result<(), ThingHubError> {
        Err(ThingHubError::unsupported_command(command))
    }
}
