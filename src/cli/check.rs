//! Check subcommand: classify one package against the project manifest.

use crate::metadata::to_pretty_json;
use crate::package::{
    DependencyType, ManifestDependencies, Package, PackageInfo, PackageStatus,
};
use crate::project::BowerProject;
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::Path;

/// Arguments for the check subcommand
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Package name
    pub name: String,

    /// Installed version (omit for a missing package)
    #[arg(long, value_name = "VERSION")]
    pub installed: Option<String>,

    /// Latest version available from the registry
    #[arg(long, value_name = "VERSION")]
    pub latest: Option<String>,

    /// Declared range (default: read from bower.json)
    #[arg(long, value_name = "RANGE")]
    pub range: Option<String>,
}

/// Summary printed by the check subcommand.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageReport {
    pub name: String,
    pub status: PackageStatus,
    pub dependency_type: DependencyType,
    pub direct: bool,
    pub version: Option<String>,
    pub latest_version: Option<String>,
    pub bower_json_version: Option<String>,
    pub has_updates: bool,
    pub in_sync: bool,
}

impl PackageReport {
    pub fn from_package(pkg: &Package, manifest: Option<&ManifestDependencies>) -> Self {
        Self {
            name: pkg.name().to_string(),
            status: pkg.status,
            dependency_type: pkg.dependency_type,
            direct: Package::is_project_direct_dependency(pkg.name(), pkg.status, manifest),
            version: pkg.version.clone(),
            latest_version: pkg.latest_version.clone(),
            bower_json_version: pkg.bower_json_version.clone(),
            has_updates: pkg.has_updates(),
            in_sync: pkg.is_version_in_sync(),
        }
    }
}

/// Build a package from command-line facts and the manifest.
pub fn build_package(args: &CheckArgs, manifest: Option<&ManifestDependencies>) -> Package {
    let mut pkg = Package::new(args.name.clone());
    pkg.version = args.installed.clone();
    pkg.bower_json_version = args
        .range
        .clone()
        .or_else(|| manifest.and_then(|m| m.range_for(&args.name).map(String::from)));

    let declared = Package::is_in_bower_json_deps(&args.name, manifest);
    pkg.status = match (&pkg.version, manifest) {
        (None, _) => PackageStatus::Missing,
        (Some(_), Some(_)) if !declared => PackageStatus::NotTracked,
        (Some(_), _) => PackageStatus::Installed,
    };

    let in_production = manifest
        .and_then(|m| m.dependencies.as_ref())
        .is_some_and(|deps| deps.contains_key(&args.name));
    if declared && !in_production {
        pkg.dependency_type = DependencyType::Development;
    }

    pkg.update_version_info(Some(&PackageInfo {
        name: args.name.clone(),
        latest_version: args.latest.clone(),
        versions: Vec::new(),
    }));

    pkg
}

/// Run the check subcommand.
pub async fn run_check(root: &Path, args: &CheckArgs) -> Result<()> {
    let project = BowerProject::open(root)
        .await
        .with_context(|| format!("Failed to open project at {}", root.display()))?;
    let manifest = project.manifest().map(|m| m.dependencies());

    let pkg = build_package(args, manifest.as_ref());
    let report = PackageReport::from_package(&pkg, manifest.as_ref());

    println!("{}", to_pretty_json(&report)?);
    Ok(())
}
