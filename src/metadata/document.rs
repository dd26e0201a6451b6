//! Generic file-backed JSON document.
//!
//! [`MetadataFile`] pairs a [`Storage`] with the last document parsed from it.
//! Concrete metadata files (`.bowerrc`, `bower.json`) hold one by value and add
//! their own semantics on top.

use super::storage::{FileStorage, Storage};
use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// A JSON document of schema `T` persisted through a [`Storage`].
#[derive(Debug, Clone)]
pub struct MetadataFile<T> {
    file_name: &'static str,
    storage: Arc<dyn Storage>,
    data: T,
}

impl<T> MetadataFile<T>
where
    T: Serialize + DeserializeOwned + Clone + Default,
{
    /// Create a document over an explicit storage, starting from `T::default()`.
    pub fn new(file_name: &'static str, storage: Arc<dyn Storage>) -> Self {
        Self {
            file_name,
            storage,
            data: T::default(),
        }
    }

    /// Create a document backed by `dir/<file_name>` on disk.
    pub fn in_dir(file_name: &'static str, dir: &Path) -> Self {
        Self::new(file_name, Arc::new(FileStorage::new(dir.join(file_name))))
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Independent copy of the held document.
    pub fn data(&self) -> T {
        self.data.clone()
    }

    /// Borrow the held document without copying.
    pub fn data_ref(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn set_data(&mut self, data: T) {
        self.data = data;
    }

    /// Read the raw text of the backing document.
    pub async fn read(&self) -> Result<String> {
        Ok(self.storage.read().await?)
    }

    /// Read and parse the backing document without adopting it.
    ///
    /// A failed read short-circuits before parsing.
    pub async fn read_document(&self) -> Result<T> {
        let content = self.read().await?;
        serde_json::from_str(&content).map_err(|e| {
            warn!("Error parsing {}: {}", self.file_name, e);
            Error::malformed(self.file_name, e)
        })
    }

    /// Replace the backing document with raw text.
    pub async fn save_content(&self, content: &str) -> Result<()> {
        Ok(self.storage.save_content(content).await?)
    }

    /// Persist the held document, pretty-printed.
    pub async fn save(&self) -> Result<()> {
        let content = to_pretty_json(&self.data)?;
        self.save_content(&content).await
    }
}

/// Serialize `value` as JSON with 4-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
