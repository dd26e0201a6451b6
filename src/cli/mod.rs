//! CLI command definitions for bowerkit
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod check;
pub mod config;
pub mod watch;

use check::CheckArgs;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use watch::WatchArgs;

/// Bower project configuration and package inspection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn project_root(&self) -> PathBuf {
        self.project.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective configuration (default if no subcommand given)
    Config,

    /// Create a default .bowerrc in the project
    Init(InitArgs),

    /// Change the install directory in .bowerrc
    SetDirectory(SetDirectoryArgs),

    /// Watch .bowerrc and bower.json and report changes
    Watch(WatchArgs),

    /// Report version and status information for one package
    Check(CheckArgs),
}

/// Arguments for the init subcommand
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing .bowerrc
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the set-directory subcommand
#[derive(Args, Debug)]
pub struct SetDirectoryArgs {
    /// New install directory, relative to the project root
    pub directory: String,
}
