//! Storage collaborators for metadata files.
//!
//! A [`Storage`] owns exactly one backing document. The library never touches
//! the file system except through these types.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read/write access to a single backing document.
#[async_trait]
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Location of the backing document.
    fn path(&self) -> &Path;

    /// Read the full document as text.
    async fn read(&self) -> io::Result<String>;

    /// Replace the document with `content`.
    async fn save_content(&self, content: &str) -> io::Result<()>;
}

/// Storage backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Storage for FileStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> io::Result<String> {
        debug!("Reading {}", self.path.display());
        tokio::fs::read_to_string(&self.path).await
    }

    async fn save_content(&self, content: &str) -> io::Result<()> {
        debug!("Writing {} ({} bytes)", self.path.display(), content.len());
        tokio::fs::write(&self.path, content).await
    }
}

/// Check whether `path` exists. Errors (e.g. permission denied) count as absent.
pub async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
