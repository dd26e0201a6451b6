//! The effective configuration document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the install directory setting.
pub const KEY_DIRECTORY: &str = "directory";
/// Key of the interactive flag.
pub const KEY_INTERACTIVE: &str = "interactive";
/// Key of the working directory, always the project root.
pub const KEY_CWD: &str = "cwd";

/// A plain key-value configuration document.
///
/// Recognized keys have typed accessors; anything else is carried through
/// untouched so the package manager can consume it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Map<String, Value>);

impl Configuration {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn directory(&self) -> Option<&str> {
        self.0.get(KEY_DIRECTORY).and_then(Value::as_str)
    }

    /// The interactive flag; absent or non-boolean values read as `false`.
    pub fn interactive(&self) -> bool {
        self.0
            .get(KEY_INTERACTIVE)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn cwd(&self) -> Option<&str> {
        self.0.get(KEY_CWD).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Configuration {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
