//! Watch subcommand: reload project metadata as it changes on disk.

use crate::config::ConfigurationResolver;
use crate::metadata::watcher::{WatcherConfig, start_metadata_watcher};
use crate::metadata::{BOWER_JSON_FILE, BOWERRC_FILE};
use crate::project::{BowerProject, Project};
use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

/// Arguments for the watch subcommand
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Debounce window in milliseconds
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,
}

/// Run until interrupted, reloading `.bowerrc` and `bower.json` on change.
pub async fn run_watch(root: &Path, args: &WatchArgs) -> Result<()> {
    let mut project = BowerProject::open(root)
        .await
        .with_context(|| format!("Failed to open project at {}", root.display()))?;
    let resolver = ConfigurationResolver::discover();

    let config = WatcherConfig {
        debounce_duration: Duration::from_millis(args.debounce_ms),
    };
    let mut handle = start_metadata_watcher(project.path(), config)
        .context("Failed to start metadata watcher")?;

    loop {
        let event = tokio::select! {
            event = handle.wait_for_change() => event,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watcher");
                return Ok(());
            }
        };

        let Some(event) = event else {
            warn!("Metadata watcher stopped");
            return Ok(());
        };

        if event.affects_bowerrc() {
            match project.reload_config_file().await {
                Ok(Some(fields)) => {
                    let config = resolver.resolve(Some(&project))?;
                    println!(
                        "{} changed: {} (directory: {})",
                        BOWERRC_FILE,
                        fields.join(", "),
                        config.directory().unwrap_or_default()
                    );
                }
                Ok(None) => info!("{} reloaded, no tracked changes", BOWERRC_FILE),
                Err(e) => error!("Failed to reload {}: {}", BOWERRC_FILE, e),
            }
        }

        if event.affects_bower_json() {
            match project.reload_manifest().await {
                Ok(()) => println!("{} reloaded", BOWER_JSON_FILE),
                Err(e) => error!("Failed to reload {}: {}", BOWER_JSON_FILE, e),
            }
        }
    }
}
