//! bowerkit library
//!
//! Configuration resolution for bower projects and the in-memory package
//! dependency model.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod package;
pub mod project;

pub use error::{Error, Result};
