//! Configuration resolution.
//!
//! The effective configuration is rebuilt on every request from:
//! 1. **Project** - the project's `.bowerrc`, or the built-in defaults when absent
//! 2. **User** - `<config_dir>/bowerkit/config.json`
//! 3. **Environment** - `BOWERKIT_*` variables
//! 4. **cwd** - always forced to the project root
//!
//! ## Merge Strategy
//! Layers merge shallowly: a top-level key from a higher layer replaces the
//! lower value wholesale. Null values in a higher layer are ignored.
//!
//! ## Environment Variables
//! - `BOWERKIT_USER_CONFIG` - Explicit user config file
//! - `BOWERKIT_DIRECTORY` - Install directory
//! - `BOWERKIT_INTERACTIVE` - Interactive flag (`true`/`false`/`1`/`0`)
//! - `BOWERKIT_PROXY` - HTTP proxy
//! - `BOWERKIT_HTTPS_PROXY` - HTTPS proxy

mod loader;
mod merge;
mod resolver;
mod types;

pub use loader::{ConfigTier, ENV_USER_CONFIG, HostConfiguration, HostPaths};
pub use merge::shallow_merge;
pub use resolver::{ConfigurationResolver, default_configuration};
pub use types::{Configuration, KEY_CWD, KEY_DIRECTORY, KEY_INTERACTIVE};
