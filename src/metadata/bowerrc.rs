//! Per-project `.bowerrc` configuration file.

use super::document::{MetadataFile, to_pretty_json};
use super::storage::{self, Storage};
use crate::config::{Configuration, KEY_DIRECTORY, KEY_INTERACTIVE};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Canonical file name of the project configuration file.
pub const BOWERRC_FILE: &str = ".bowerrc";

/// Default install directory, without trailing slash.
pub const DEFAULT_DIRECTORY: &str = "bower_components";

/// Default value of the `interactive` flag.
pub const DEFAULT_INTERACTIVE: bool = false;

/// Contents of a `.bowerrc` file.
///
/// Held as the raw JSON object so every key survives a load/save cycle and
/// reaches the resolved configuration. Known keys are read through typed
/// accessors that treat a value of the wrong type as absent. A document that
/// is valid JSON but not an object holds no keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct BowerRcData(Map<String, Value>);

impl BowerRcData {
    /// Content written by [`BowerRc::create`].
    pub fn defaults() -> Self {
        let mut map = Map::new();
        map.insert(KEY_DIRECTORY.to_string(), Value::from(format!("{}/", DEFAULT_DIRECTORY)));
        map.insert(KEY_INTERACTIVE.to_string(), Value::from(DEFAULT_INTERACTIVE));
        Self(map)
    }

    /// The install directory, when set to a string.
    pub fn directory(&self) -> Option<&str> {
        self.0.get(KEY_DIRECTORY).and_then(Value::as_str)
    }

    /// The interactive flag, when set to a boolean.
    pub fn interactive(&self) -> Option<bool> {
        self.0.get(KEY_INTERACTIVE).and_then(Value::as_bool)
    }

    /// Raw `directory` value, whatever its type.
    fn raw_directory(&self) -> Option<&Value> {
        self.0.get(KEY_DIRECTORY)
    }

    fn set_directory(&mut self, directory: String) {
        self.0.insert(KEY_DIRECTORY.to_string(), Value::String(directory));
    }

    /// Convert into a configuration document.
    pub fn to_configuration(&self) -> Configuration {
        Configuration::from_map(self.0.clone())
    }
}

impl From<Value> for BowerRcData {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            other => {
                warn!("{} is not a JSON object, ignoring its content: {}", BOWERRC_FILE, other);
                Self::default()
            }
        }
    }
}

impl From<BowerRcData> for Value {
    fn from(data: BowerRcData) -> Self {
        Value::Object(data.0)
    }
}

/// Field names reported by [`BowerRc::load`].
pub const DIRECTORY_FIELD: &str = "directory";

/// The project's `.bowerrc`.
///
/// Change detection compares against the data adopted by the last
/// [`load`](BowerRc::load), so an in-memory edit followed by a reload still
/// reports the edited field.
#[derive(Debug, Clone)]
pub struct BowerRc {
    file: MetadataFile<BowerRcData>,
    loaded_directory: Option<Value>,
}

impl BowerRc {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            file: MetadataFile::new(BOWERRC_FILE, storage),
            loaded_directory: None,
        }
    }

    /// `.bowerrc` inside `project_root`.
    pub fn in_dir(project_root: &Path) -> Self {
        Self {
            file: MetadataFile::in_dir(BOWERRC_FILE, project_root),
            loaded_directory: None,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Independent copy of the currently held data.
    pub fn data(&self) -> BowerRcData {
        self.file.data()
    }

    pub fn directory(&self) -> Option<&str> {
        self.file.data_ref().directory()
    }

    pub fn interactive(&self) -> Option<bool> {
        self.file.data_ref().interactive()
    }

    /// Write the default content to the backing store.
    ///
    /// The held data is left untouched; call [`load`](Self::load) to adopt it.
    pub async fn create(&self) -> Result<()> {
        let content = to_pretty_json(&BowerRcData::defaults())?;
        info!("Creating {}", self.path().display());
        self.file.save_content(&content).await
    }

    /// Read and parse the file, adopting its content.
    ///
    /// Returns the names of tracked fields whose value changed, or `None` when
    /// nothing tracked changed. Only `directory` is tracked.
    pub async fn load(&mut self) -> Result<Option<Vec<String>>> {
        let configuration = self.file.read_document().await?;
        let changed = self.changed_fields(&configuration);

        if let Some(ref fields) = changed {
            debug!("{} changed: {}", BOWERRC_FILE, fields.join(", "));
        }

        self.loaded_directory = configuration.raw_directory().cloned();
        self.file.set_data(configuration);
        Ok(changed)
    }

    /// File-watch notification path. Same semantics as [`load`](Self::load).
    pub async fn on_content_changed(&mut self) -> Result<Option<Vec<String>>> {
        self.load().await
    }

    /// Update the install directory and persist the whole document.
    pub async fn set_directory(&mut self, directory: &str) -> Result<()> {
        self.file
            .data_mut()
            .set_directory(normalize_directory(directory));
        self.file.save().await
    }

    /// Whether a `.bowerrc` exists in `dir`.
    pub async fn find_in_path(dir: &Path) -> bool {
        storage::exists(&dir.join(BOWERRC_FILE)).await
    }

    fn changed_fields(&self, configuration: &BowerRcData) -> Option<Vec<String>> {
        let mut changed = Vec::new();

        if self.loaded_directory.as_ref() != configuration.raw_directory() {
            changed.push(DIRECTORY_FIELD.to_string());
        }

        if changed.is_empty() {
            None
        } else {
            Some(changed)
        }
    }
}

/// Ensure a non-empty directory ends with a single `/`.
pub fn normalize_directory(directory: &str) -> String {
    let trimmed = directory.trim();
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
