//! Connection: a transport or session used to reach one or more devices.
//!
//! From the core's perspective a connection is only an identity plus an
//! opaque liveness flag. Everything else (sockets, bus handles, cloud
//! sessions) belongs to the platform that built it.

use std::fmt;

use crate::id::ConnectionId;

/// A live transport shared by the things built on top of it.
///
/// Connections are created by a platform's connection factory and held for
/// the whole process lifetime, so they are shared as `Arc<dyn Connection>`.
pub trait Connection: fmt::Debug + Send + Sync {
    /// Caller-assigned identifier.
    fn id(&self) -> &ConnectionId;

    /// Whether the transport is currently usable.
    fn is_alive(&self) -> bool {
        true
    }
}
