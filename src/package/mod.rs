//! Package dependency model.
//!
//! A [`Package`] is one node of the project's dependency graph. It is created
//! and updated by whoever lists or installs packages; the model itself never
//! changes its own status.

pub mod version;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Installation status of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    /// Declared and present on disk
    #[default]
    Installed,
    /// Declared but not present on disk
    Missing,
    /// Present on disk but not declared ("extraneous")
    NotTracked,
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageStatus::Installed => write!(f, "installed"),
            PackageStatus::Missing => write!(f, "missing"),
            PackageStatus::NotTracked => write!(f, "not tracked"),
        }
    }
}

/// Which manifest section a package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyType {
    #[default]
    Production,
    Development,
}

/// A dependency declared by a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDependency {
    pub name: String,
    /// Requested version range, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PackageDependency {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// Freshly fetched registry information about a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub versions: Vec<String>,
}

/// The `dependencies` and `devDependencies` sections of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestDependencies {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,

    #[serde(
        default,
        rename = "devDependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}

impl ManifestDependencies {
    /// Whether `name` is declared in either section.
    pub fn contains(&self, name: &str) -> bool {
        self.range_for(name).is_some()
    }

    /// Declared range for `name`, production section first.
    pub fn range_for(&self, name: &str) -> Option<&str> {
        self.dependencies
            .as_ref()
            .and_then(|deps| deps.get(name))
            .or_else(|| self.dev_dependencies.as_ref().and_then(|deps| deps.get(name)))
            .map(String::as_str)
    }
}

/// One installed or trackable package.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    name: String,

    /// Installed version.
    pub version: Option<String>,
    /// Newest version available from the registry.
    pub latest_version: Option<String>,
    /// Range declared in the project manifest.
    pub bower_json_version: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub source: Option<String>,
    /// Absolute path of the package installation directory.
    pub installation_dir: Option<String>,
    /// False only once the package is known to be a transitive-only dependency.
    pub is_project_dependency: bool,
    pub status: PackageStatus,
    pub dependency_type: DependencyType,

    #[serde(default)]
    dependencies: BTreeMap<String, PackageDependency>,
    #[serde(default)]
    dependants: Vec<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            latest_version: None,
            bower_json_version: None,
            description: None,
            homepage: None,
            source: None,
            installation_dir: None,
            is_project_dependency: true,
            status: PackageStatus::default(),
            dependency_type: DependencyType::default(),
            dependencies: BTreeMap::new(),
            dependants: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Dependencies

    /// Insert or replace a dependency by name. `None` is ignored.
    pub fn add_dependency(&mut self, dependency: Option<PackageDependency>) {
        if let Some(dependency) = dependency {
            self.dependencies.insert(dependency.name.clone(), dependency);
        }
    }

    pub fn remove_dependency(&mut self, name: &str) {
        self.dependencies.remove(name);
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    pub fn dependency(&self, name: &str) -> Option<&PackageDependency> {
        self.dependencies.get(name)
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &PackageDependency> {
        self.dependencies.values()
    }

    pub fn dependencies_names(&self) -> Vec<&str> {
        self.dependencies.keys().map(String::as_str).collect()
    }

    pub fn dependencies_count(&self) -> usize {
        self.dependencies.len()
    }

    // Dependants

    /// Record that `name` depends on this package. Duplicates are ignored.
    pub fn add_dependant(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.has_dependant(&name) {
            self.dependants.push(name);
        }
    }

    pub fn remove_dependant(&mut self, name: &str) {
        self.dependants.retain(|dependant| dependant != name);
    }

    pub fn has_dependants(&self) -> bool {
        !self.dependants.is_empty()
    }

    pub fn has_dependant(&self, name: &str) -> bool {
        self.dependants.iter().any(|dependant| dependant == name)
    }

    pub fn dependants(&self) -> &[String] {
        &self.dependants
    }

    pub fn dependants_count(&self) -> usize {
        self.dependants.len()
    }

    // Versions

    /// Whether `latest_version` is newer than the installed `version`.
    ///
    /// False while either is unknown.
    pub fn has_updates(&self) -> bool {
        match (&self.version, &self.latest_version) {
            (Some(current), Some(latest)) => version::has_newer_component(current, latest),
            _ => false,
        }
    }

    /// Whether the installed version satisfies the manifest range.
    ///
    /// True when either side is unknown or the declared range is not a
    /// version range at all (tags, URLs).
    pub fn is_version_in_sync(&self) -> bool {
        let (Some(installed), Some(declared)) = (&self.version, &self.bower_json_version) else {
            return true;
        };

        if !version::is_valid_range(declared) {
            return true;
        }

        version::satisfies(installed, declared)
    }

    /// Adopt the latest version from registry info. Missing info is ignored.
    pub fn update_version_info(&mut self, info: Option<&PackageInfo>) {
        let Some(latest) = info.and_then(|info| info.latest_version.as_ref()) else {
            return;
        };

        trace!("{}: latest version {}", self.name, latest);
        self.latest_version = Some(latest.clone());
    }

    // Classification

    pub fn is_dev_dependency(&self) -> bool {
        self.dependency_type == DependencyType::Development
    }

    pub fn is_production_dependency(&self) -> bool {
        self.dependency_type == DependencyType::Production
    }

    /// Installed means present on disk, tracked or not.
    pub fn is_installed(&self) -> bool {
        self.status != PackageStatus::Missing
    }

    pub fn is_missing(&self) -> bool {
        self.status == PackageStatus::Missing
    }

    pub fn is_not_tracked(&self) -> bool {
        self.status == PackageStatus::NotTracked
    }

    /// Compares dependency type, status and declared range only.
    pub fn is_equal_to(&self, other: &Package) -> bool {
        self.dependency_type == other.dependency_type
            && self.status == other.status
            && self.bower_json_version == other.bower_json_version
    }

    /// Whether `name` is declared in the manifest's production or development
    /// dependencies.
    pub fn is_in_bower_json_deps(name: &str, manifest: Option<&ManifestDependencies>) -> bool {
        manifest.is_some_and(|deps| deps.contains(name))
    }

    /// Whether a package should be reported as a direct project dependency.
    ///
    /// Missing and not-tracked packages always are. Installed ones are when
    /// there is no manifest or the manifest declares them.
    pub fn is_project_direct_dependency(
        name: &str,
        status: PackageStatus,
        manifest: Option<&ManifestDependencies>,
    ) -> bool {
        if status != PackageStatus::Installed {
            return true;
        }

        match manifest {
            Some(deps) => Self::is_in_bower_json_deps(name, Some(deps)),
            None => true,
        }
    }
}
