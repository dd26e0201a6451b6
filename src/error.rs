//! Error types shared by the configuration and metadata layers.

use thiserror::Error;

/// Errors surfaced by configuration resolution and metadata file operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration was requested while no project is open.
    #[error("No project is currently open")]
    NoProject,

    /// A metadata file exists but its content is not valid JSON.
    #[error("Malformed {file}: {message}")]
    MalformedConfig {
        file: String,
        /// The parser's original message.
        message: String,
    },

    /// The project has no active `.bowerrc` to operate on.
    #[error("Project has no {file} file")]
    NotLoaded { file: String },

    /// Storage-layer failure, propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to encode a document before writing it.
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(file: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::MalformedConfig {
            file: file.into(),
            message: err.to_string(),
        }
    }

    /// Returns the parser message for malformed documents.
    pub fn original_message(&self) -> Option<&str> {
        match self {
            Error::MalformedConfig { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, Error>;
