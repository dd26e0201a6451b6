//! Host project abstraction.
//!
//! Configuration resolution only needs three things from a project: its root
//! directory, whether it has a `.bowerrc`, and that file's current data.

use crate::error::{Error, Result};
use crate::metadata::{BOWERRC_FILE, BowerJson, BowerRc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A project as seen by the configuration resolver.
pub trait Project {
    /// Absolute root directory of the project.
    fn path(&self) -> &Path;

    /// The project's active `.bowerrc`, if it has one.
    fn active_config_file(&self) -> Option<&BowerRc>;

    fn has_config_file(&self) -> bool {
        self.active_config_file().is_some()
    }
}

/// A project rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct BowerProject {
    root: PathBuf,
    bowerrc: Option<BowerRc>,
    bower_json: Option<BowerJson>,
}

impl BowerProject {
    /// A project with no metadata files attached.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bowerrc: None,
            bower_json: None,
        }
    }

    /// Open the project at `root`, loading `.bowerrc` and `bower.json` when present.
    ///
    /// A malformed `.bowerrc` fails the open; a malformed manifest does too.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = std::path::absolute(root.into())?;
        let mut project = Self::new(root);
        project.reload_config_file().await?;
        project.reload_manifest().await?;
        info!("Opened project {}", project.root.display());
        Ok(project)
    }

    pub fn with_config_file(mut self, bowerrc: BowerRc) -> Self {
        self.bowerrc = Some(bowerrc);
        self
    }

    pub fn config_file_mut(&mut self) -> Option<&mut BowerRc> {
        self.bowerrc.as_mut()
    }

    pub fn manifest(&self) -> Option<&BowerJson> {
        self.bower_json.as_ref()
    }

    /// Re-check for `.bowerrc` and reload it.
    ///
    /// Returns the changed fields reported by [`BowerRc::load`]. A file that
    /// disappeared detaches the config file and reports no change.
    pub async fn reload_config_file(&mut self) -> Result<Option<Vec<String>>> {
        if !BowerRc::find_in_path(&self.root).await {
            if self.bowerrc.take().is_some() {
                debug!("{} removed from {}", BOWERRC_FILE, self.root.display());
            }
            return Ok(None);
        }

        let bowerrc = self
            .bowerrc
            .get_or_insert_with(|| BowerRc::in_dir(&self.root));
        bowerrc.on_content_changed().await
    }

    /// Re-check for `bower.json` and reload it.
    pub async fn reload_manifest(&mut self) -> Result<()> {
        if !BowerJson::find_in_path(&self.root).await {
            self.bower_json = None;
            return Ok(());
        }

        let mut manifest = BowerJson::in_dir(&self.root);
        manifest.load().await?;
        self.bower_json = Some(manifest);
        Ok(())
    }

    /// Create a default `.bowerrc` and attach it.
    pub async fn create_config_file(&mut self) -> Result<&BowerRc> {
        let mut bowerrc = BowerRc::in_dir(&self.root);
        bowerrc.create().await?;
        bowerrc.load().await?;
        Ok(self.bowerrc.insert(bowerrc))
    }

    /// Change the install directory in the attached `.bowerrc`.
    pub async fn set_directory(&mut self, directory: &str) -> Result<()> {
        match self.bowerrc.as_mut() {
            Some(bowerrc) => bowerrc.set_directory(directory).await,
            None => Err(Error::NotLoaded {
                file: BOWERRC_FILE.to_string(),
            }),
        }
    }
}

impl Project for BowerProject {
    fn path(&self) -> &Path {
        &self.root
    }

    fn active_config_file(&self) -> Option<&BowerRc> {
        self.bowerrc.as_ref()
    }
}
