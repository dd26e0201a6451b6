//! Effective configuration resolution.

use super::loader::{ConfigTier, HostConfiguration};
use super::merge::shallow_merge;
use super::types::{Configuration, KEY_CWD, KEY_DIRECTORY, KEY_INTERACTIVE};
use crate::error::{Error, Result};
use crate::metadata::{DEFAULT_DIRECTORY, DEFAULT_INTERACTIVE};
use crate::project::Project;
use tracing::debug;

/// Built-in defaults used when a project has no `.bowerrc`.
pub fn default_configuration() -> Configuration {
    let mut config = Configuration::new();
    config.set(KEY_DIRECTORY, DEFAULT_DIRECTORY);
    config.set(KEY_INTERACTIVE, DEFAULT_INTERACTIVE);
    config
}

/// Builds the effective configuration for a project.
///
/// Layers, lowest first: the project's `.bowerrc` (or the defaults when it has
/// none), then the host layer, then `cwd` forced to the project root. Nothing is
/// cached; every call re-reads the project state.
#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    defaults: Configuration,
    host: HostConfiguration,
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::new(HostConfiguration::empty())
    }
}

impl ConfigurationResolver {
    pub fn new(host: HostConfiguration) -> Self {
        Self {
            defaults: default_configuration(),
            host,
        }
    }

    /// Resolver using the discovered user file and environment as host layer.
    pub fn discover() -> Self {
        Self::new(HostConfiguration::discover())
    }

    pub fn host(&self) -> &HostConfiguration {
        &self.host
    }

    /// Resolve the effective configuration.
    ///
    /// Fails with [`Error::NoProject`] when no project is open.
    pub fn resolve<P: Project + ?Sized>(&self, project: Option<&P>) -> Result<Configuration> {
        let project = project.ok_or(Error::NoProject)?;

        let (base, tier) = match project.active_config_file() {
            Some(bowerrc) => (bowerrc.data().to_configuration(), ConfigTier::Project),
            None => (self.defaults.clone(), ConfigTier::Defaults),
        };

        let mut config = Configuration::from_map(shallow_merge(
            base.into_map(),
            self.host.configuration(),
        ));

        config.set(KEY_CWD, project.path().to_string_lossy().into_owned());

        debug!(
            "Resolved configuration for {} from {} + host {:?}",
            project.path().display(),
            tier,
            self.host.tiers()
        );

        Ok(config)
    }
}
