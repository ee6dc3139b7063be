//! # thinghub-domain
//!
//! Pure domain model for the thinghub device core.
//!
//! ## Responsibilities
//! - Foundational types: caller-assigned identifiers, error conventions, timestamps
//! - Define **Connections** (transports/sessions used to reach devices)
//! - Define **Things** (one controllable device, bound to exactly one connection)
//! - Define **Capabilities** (`State`, `Actuator`) that things opt into
//! - Define the **settings** entries the configuration layer hands to the core
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod error;
pub mod id;
pub mod params;
pub mod time;

pub mod capability;
pub mod connection;
pub mod metadata;
pub mod settings;
pub mod thing;
