//! Host-level configuration layer.
//!
//! The host layer sits above the project `.bowerrc` and below the forced `cwd`.
//! It is assembled from two tiers:
//! 1. **User** - `<config_dir>/bowerkit/config.json` (or `BOWERKIT_USER_CONFIG`)
//! 2. **Environment** - `BOWERKIT_*` variables (highest priority)

use super::merge::shallow_merge;
use super::types::{KEY_DIRECTORY, KEY_INTERACTIVE};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit user config file.
pub const ENV_USER_CONFIG: &str = "BOWERKIT_USER_CONFIG";

/// Environment variables mapped onto configuration keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("BOWERKIT_DIRECTORY", KEY_DIRECTORY),
    ("BOWERKIT_INTERACTIVE", KEY_INTERACTIVE),
    ("BOWERKIT_PROXY", "proxy"),
    ("BOWERKIT_HTTPS_PROXY", "https-proxy"),
];

/// Host layer tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project `.bowerrc`
    Project = 1,
    /// User-level config file
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Location of the user-level config file.
#[derive(Debug, Clone, Default)]
pub struct HostPaths {
    pub user_config: Option<PathBuf>,
}

impl HostPaths {
    /// Discover the user config file from the environment and platform dirs.
    pub fn discover() -> Self {
        let user_config = std::env::var(ENV_USER_CONFIG)
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("bowerkit").join("config.json")));

        Self { user_config }
    }

    pub fn with_user_config(user_config: Option<PathBuf>) -> Self {
        Self { user_config }
    }
}

/// Settings contributed by the hosting application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfiguration {
    layer: Map<String, Value>,
    user_config_path: Option<PathBuf>,
    tiers: Vec<ConfigTier>,
}

impl HostConfiguration {
    /// A host layer that contributes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A host layer with explicit settings.
    pub fn from_map(layer: Map<String, Value>) -> Self {
        Self {
            layer,
            user_config_path: None,
            tiers: Vec::new(),
        }
    }

    /// Load from the discovered user file and the process environment.
    pub fn discover() -> Self {
        Self::load_with(HostPaths::discover(), |key| std::env::var(key).ok())
    }

    /// Load from explicit paths and an environment lookup.
    pub fn load_with(paths: HostPaths, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut host = Self::empty();

        if let Some(path) = paths.user_config
            && let Some(user_layer) = read_user_layer(&path)
        {
            host.layer = shallow_merge(host.layer, user_layer);
            host.user_config_path = Some(path);
            host.tiers.push(ConfigTier::User);
        }

        let env_layer = env_overrides(env);
        if !env_layer.is_empty() {
            debug!("Applying {} environment override(s)", env_layer.len());
            host.layer = shallow_merge(host.layer, env_layer);
            host.tiers.push(ConfigTier::Environment);
        }

        host
    }

    /// Independent copy of the host settings.
    pub fn configuration(&self) -> Map<String, Value> {
        self.layer.clone()
    }

    /// The user config file that contributed settings, if any.
    pub fn user_config_path(&self) -> Option<&Path> {
        self.user_config_path.as_deref()
    }

    /// Tiers that contributed settings, lowest first.
    pub fn tiers(&self) -> &[ConfigTier] {
        &self.tiers
    }
}

/// Read the user config file. Missing or unusable files contribute nothing.
fn read_user_layer(path: &Path) -> Option<Map<String, Value>> {
    if !path.exists() {
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read user config {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            warn!("Ignoring user config {}: not a JSON object", path.display());
            None
        }
        Err(e) => {
            warn!("Ignoring malformed user config {}: {}", path.display(), e);
            None
        }
    }
}

fn env_overrides(env: impl Fn(&str) -> Option<String>) -> Map<String, Value> {
    let mut layer = Map::new();

    for &(var, key) in ENV_OVERRIDES {
        let Some(raw) = env(var) else { continue };
        let value = if key == KEY_INTERACTIVE {
            match parse_flag(&raw) {
                Some(flag) => Value::Bool(flag),
                None => {
                    warn!("Ignoring {}={}: expected a boolean", var, raw);
                    continue;
                }
            }
        } else {
            Value::String(raw)
        };
        layer.insert(key.to_string(), value);
    }

    layer
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_no_sources_is_empty() {
        let temp = TempDir::new().unwrap();
        let paths = HostPaths::with_user_config(Some(temp.path().join("missing.json")));

        let host = HostConfiguration::load_with(paths, env_from(&[]));
        assert!(host.configuration().is_empty());
        assert!(host.user_config_path().is_none());
        assert!(host.tiers().is_empty());
    }

    #[test]
    fn test_user_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.json");
        std::fs::write(&file, r#"{"proxy": "http://proxy:3128", "interactive": true}"#).unwrap();

        let host = HostConfiguration::load_with(
            HostPaths::with_user_config(Some(file.clone())),
            env_from(&[]),
        );

        assert_eq!(
            Value::Object(host.configuration()),
            json!({"proxy": "http://proxy:3128", "interactive": true})
        );
        assert_eq!(host.user_config_path(), Some(file.as_path()));
        assert_eq!(host.tiers(), &[ConfigTier::User]);
    }

    #[test]
    fn test_environment_overrides_user_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.json");
        std::fs::write(&file, r#"{"directory": "from-user/", "proxy": "http://a"}"#).unwrap();

        let host = HostConfiguration::load_with(
            HostPaths::with_user_config(Some(file)),
            env_from(&[("BOWERKIT_DIRECTORY", "from-env/"), ("BOWERKIT_INTERACTIVE", "yes")]),
        );

        assert_eq!(
            Value::Object(host.configuration()),
            json!({"directory": "from-env/", "proxy": "http://a", "interactive": true})
        );
        assert_eq!(host.tiers(), &[ConfigTier::User, ConfigTier::Environment]);
    }

    #[test]
    fn test_malformed_user_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.json");
        std::fs::write(&file, "{ nope").unwrap();

        let host =
            HostConfiguration::load_with(HostPaths::with_user_config(Some(file)), env_from(&[]));
        assert!(host.configuration().is_empty());
    }

    #[test]
    fn test_invalid_interactive_flag_is_skipped() {
        let host = HostConfiguration::load_with(
            HostPaths::default(),
            env_from(&[("BOWERKIT_INTERACTIVE", "maybe"), ("BOWERKIT_HTTPS_PROXY", "https://b")]),
        );
        assert_eq!(
            Value::Object(host.configuration()),
            json!({"https-proxy": "https://b"})
        );
    }

    #[test]
    fn test_tier_ordering() {
        assert!(ConfigTier::Defaults < ConfigTier::Project);
        assert!(ConfigTier::User < ConfigTier::Environment);
        assert_eq!(ConfigTier::Environment.to_string(), "environment");
    }
}
