//! Port definitions: traits the use-case layer depends on.
//!
//! Ports live here (in `app`) so that services can be exercised against
//! in-memory fakes while production wires them to the platform manager.

pub mod things;

pub use things::ThingRepository;
