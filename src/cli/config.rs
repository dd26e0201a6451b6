//! Configuration subcommands: `config`, `init`, `set-directory`.

use super::{InitArgs, SetDirectoryArgs};
use crate::config::ConfigurationResolver;
use crate::metadata::{BOWERRC_FILE, BowerRc, to_pretty_json};
use crate::project::{BowerProject, Project};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Print the effective configuration as JSON.
pub async fn run_config(root: &Path) -> Result<()> {
    let project = BowerProject::open(root)
        .await
        .with_context(|| format!("Failed to open project at {}", root.display()))?;

    let resolver = ConfigurationResolver::discover();
    let config = resolver.resolve(Some(&project))?;

    println!("{}", to_pretty_json(&config)?);
    Ok(())
}

/// Create a default `.bowerrc`.
pub async fn run_init(root: &Path, args: &InitArgs) -> Result<()> {
    if BowerRc::find_in_path(root).await && !args.force {
        println!(
            "{} already exists. Use --force to overwrite.",
            root.join(BOWERRC_FILE).display()
        );
        return Ok(());
    }

    let mut project = BowerProject::new(std::path::absolute(root)?);
    let bowerrc = project
        .create_config_file()
        .await
        .context("Failed to create .bowerrc")?;

    println!("Created {}", bowerrc.path().display());
    Ok(())
}

/// Change the install directory, reporting the reload result.
pub async fn run_set_directory(root: &Path, args: &SetDirectoryArgs) -> Result<()> {
    let mut project = BowerProject::open(root)
        .await
        .with_context(|| format!("Failed to open project at {}", root.display()))?;

    if !project.has_config_file() {
        info!("No .bowerrc found, creating one");
        project.create_config_file().await?;
    }

    project.set_directory(&args.directory).await?;
    let changed = project.reload_config_file().await?;

    let directory = project
        .active_config_file()
        .and_then(|rc| rc.directory())
        .unwrap_or_default();
    match changed {
        Some(fields) => println!("Updated {} -> {}", fields.join(", "), directory),
        None => println!("Install directory unchanged: {}", directory),
    }
    Ok(())
}
