//! Project metadata files.
//!
//! - [`BowerRc`] - per-project `.bowerrc` settings
//! - [`BowerJson`] - the `bower.json` manifest
//! - [`MetadataFile`] - the generic file-backed document both are built on
//! - [`watcher`] - debounced change notifications for both files

mod bower_json;
mod bowerrc;
mod document;
mod storage;
pub mod watcher;

pub use bower_json::{BOWER_JSON_FILE, BowerJson, BowerJsonData};
pub use bowerrc::{
    BOWERRC_FILE, BowerRc, BowerRcData, DEFAULT_DIRECTORY, DEFAULT_INTERACTIVE, DIRECTORY_FIELD,
    normalize_directory,
};
pub use document::{MetadataFile, to_pretty_json};
pub use storage::{FileStorage, Storage, exists};
