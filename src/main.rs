//! bowerkit command-line tool
//!
//! Resolves bower project configuration and inspects package state.

use anyhow::Result;
use bowerkit::cli::check::run_check;
use bowerkit::cli::config::{run_config, run_init, run_set_directory};
use bowerkit::cli::watch::run_watch;
use bowerkit::cli::{Cli, Command};
use bowerkit::logging::{self, LogTarget};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let root = cli.project_root();
    debug!("Project root: {}", root.display());

    match cli.command {
        Some(Command::Init(args)) => run_init(&root, &args).await?,
        Some(Command::SetDirectory(args)) => run_set_directory(&root, &args).await?,
        Some(Command::Watch(args)) => run_watch(&root, &args).await?,
        Some(Command::Check(args)) => run_check(&root, &args).await?,
        Some(Command::Config) | None => run_config(&root).await?,
    }

    Ok(())
}
