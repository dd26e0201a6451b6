//! Read-only view over the project manifest (`bower.json`).

use super::document::MetadataFile;
use super::storage::{self, Storage};
use crate::error::Result;
use crate::package::ManifestDependencies;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Canonical file name of the project manifest.
pub const BOWER_JSON_FILE: &str = "bower.json";

/// The parts of `bower.json` the package model consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BowerJsonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub dependencies: ManifestDependencies,
}

#[derive(Debug, Clone)]
pub struct BowerJson {
    file: MetadataFile<BowerJsonData>,
}

impl BowerJson {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            file: MetadataFile::new(BOWER_JSON_FILE, storage),
        }
    }

    pub fn in_dir(project_root: &Path) -> Self {
        Self {
            file: MetadataFile::in_dir(BOWER_JSON_FILE, project_root),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read and adopt the manifest.
    pub async fn load(&mut self) -> Result<()> {
        let data = self.file.read_document().await?;
        self.file.set_data(data);
        Ok(())
    }

    pub fn data(&self) -> BowerJsonData {
        self.file.data()
    }

    /// Declared production and development dependencies.
    pub fn dependencies(&self) -> ManifestDependencies {
        self.file.data_ref().dependencies.clone()
    }

    /// Range declared for `name` in either dependency map.
    pub fn declared_range(&self, name: &str) -> Option<&str> {
        self.file.data_ref().dependencies.range_for(name)
    }

    pub async fn find_in_path(dir: &Path) -> bool {
        storage::exists(&dir.join(BOWER_JSON_FILE)).await
    }
}
