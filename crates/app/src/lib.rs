//! # thinghub-app
//!
//! Application layer: factory registries, platform loading, the platform
//! manager and the use-case services built on top of it.
//!
//! ## Responsibilities
//! - Hold the **factory registries** platforms fill at load time:
//!   - `ConnectionRegistry`: connection factories keyed by connection type
//!   - `ThingRegistry`: thing factories keyed by `(platform, thing type)`
//! - Load the platforms named in configuration from a host-supplied catalog
//!   (`PlatformLoader`)
//! - Instantiate and own every connection and thing (`PlatformManager`)
//! - Define **port traits** the services depend on (`ThingRepository`)
//! - Provide **use-case services** (`ThingService`) for the API layer
//!
//! ## Dependency rule
//! Depends on `thinghub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod platform;
pub mod platform_manager;
pub mod ports;
pub mod registry;
pub mod services;
