//! Platform loading: turning a list of platform names into registered
//! factories.
//!
//! The host program decides which platforms exist by handing a catalog of
//! [`Platform`] entry points to a [`PlatformLoader`]. Configuration then picks
//! which of them to load. Loading a platform means letting it register its
//! factories; a missing or failing platform only degrades the system.

use std::collections::BTreeMap;

use thinghub_domain::error::ThingHubError;

use crate::registry::Registries;

/// A named, installable unit of connection and thing factories.
///
/// Implementations live in adapter crates (e.g. `thinghub-adapter-demo`).
pub trait Platform: Send + Sync {
    /// Unique name that configuration refers to (e.g. `"demo"`).
    fn name(&self) -> &'static str;

    /// Register this platform's factories.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot be initialised; the loader
    /// reports it and moves on.
    fn register(&self, registries: &mut Registries) -> Result<(), ThingHubError>;
}

/// Why a platform could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailureReason {
    /// No entry point with that name was provided by the host.
    #[error("platform is not installed")]
    NotInstalled,

    /// The platform's registration hook failed.
    #[error("platform registration failed")]
    Registration(#[source] ThingHubError),
}

/// One platform that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub platform: String,
    pub reason: LoadFailureReason,
}

/// Outcome of [`PlatformLoader::init_platforms`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Platforms whose factories were registered, in load order.
    pub loaded: Vec<String>,
    pub failed: Vec<LoadFailure>,
}

impl LoadReport {
    #[must_use]
    pub fn is_loaded(&self, platform: &str) -> bool {
        self.loaded.iter().any(|name| name == platform)
    }
}

/// Catalog of platform entry points supplied by the host program.
#[derive(Default)]
pub struct PlatformLoader {
    catalog: BTreeMap<&'static str, Box<dyn Platform>>,
}

impl PlatformLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `platform` loadable under its name. A later platform with the
    /// same name replaces the earlier one.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Platform + 'static) -> Self {
        self.catalog.insert(platform.name(), Box::new(platform));
        self
    }

    /// Names of the installed platforms, sorted.
    #[must_use]
    pub fn available(&self) -> Vec<&'static str> {
        self.catalog.keys().copied().collect()
    }

    /// Load every platform in `names`, in order.
    ///
    /// Failures are logged as warnings and collected in the report; they
    /// never stop the remaining names from being processed.
    #[tracing::instrument(skip_all, fields(requested = names.len()))]
    pub fn init_platforms(&self, names: &[String], registries: &mut Registries) -> LoadReport {
        let mut report = LoadReport::default();

        for name in names {
            let Some(platform) = self.catalog.get(name.as_str()) else {
                tracing::warn!(platform = %name, "failed to load platform: not installed");
                report.failed.push(LoadFailure {
                    platform: name.clone(),
                    reason: LoadFailureReason::NotInstalled,
                });
                continue;
            };

            match platform.register(registries) {
                Ok(()) => {
                    tracing::info!(platform = %name, "platform loaded");
                    report.loaded.push(name.clone());
                }
                Err(err) => {
                    tracing::warn!(platform = %name, error = %err, "failed to load platform");
                    report.failed.push(LoadFailure {
                        platform: name.clone(),
                        reason: LoadFailureReason::Registration(err),
                    });
                }
            }
        }

        report
    }
}

impl std::fmt::Debug for PlatformLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformLoader")
            .field("catalog", &self.available())
            .finish()
    }
}
