//! # thinghubd: thinghub daemon
//!
//! Composition root that wires the platforms together and runs the core.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Install the `tracing` subscriber
//! - Offer the compiled-in platforms to the loader and load the configured ones
//! - Bootstrap connections then things through the platform manager
//! - Enable every thing, wait for SIGINT, disable every thing
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use thinghub_adapter_demo::DemoPlatform;
use thinghub_app::platform::PlatformLoader;
use thinghub_app::platform_manager::PlatformManager;
use thinghub_app::registry::Registries;
use thinghub_domain::error::ThingHubError;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

/// Fatal daemon errors.
#[derive(Debug, thiserror::Error)]
enum DaemonError {
    #[error("configuration error")]
    Config(#[from] ConfigError),
    #[error("bootstrap failed")]
    Core(#[from] ThingHubError),
    #[error("failed to wait for shutdown signal")]
    Signal(#[source] std::io::Error),
}

fn init_tracing(filter: &str) {
    let (filter, invalid) = match EnvFilter::try_new(filter) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new("info"), true),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if invalid {
        tracing::warn!("invalid logging filter, falling back to `info`");
    }
}

/// Every platform this binary ships with.
fn platform_catalog() -> PlatformLoader {
    PlatformLoader::new().with_platform(DemoPlatform)
}

#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    // Platforms
    let loader = platform_catalog();
    let mut registries = Registries::default();
    let loaded = loader.init_platforms(&config.settings.platforms, &mut registries);
    tracing::info!(
        available = ?loader.available(),
        loaded = ?loaded.loaded,
        failed = loaded.failed.len(),
        "platforms initialised"
    );

    // Connections and things
    let mut manager = PlatformManager::new(registries);
    tracing::debug!(registries = ?manager.registries(), "factories registered");
    let report = manager.bootstrap(&config.settings)?;
    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "some configured entries were not created"
        );
    }

    manager.enable_all_things()?;
    tracing::info!(things = manager.fetch_all_things().len(), "thinghubd running");

    tokio::signal::ctrl_c().await.map_err(DaemonError::Signal)?;

    tracing::info!("shutting down");
    manager.disable_all_things()?;
    Ok(())
}
