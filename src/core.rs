use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::services::mpris::MediaError;

/// Error types for the controller application.
///
/// Covers configuration loading, talking to the daemon and failures bubbled
/// up from the media layer.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// The daemon is not running and could not be started
    #[error("controller daemon unavailable: {0}")]
    DaemonUnavailable(String),

    /// A call to the daemon failed
    #[error("call to controller daemon failed: {0}")]
    DaemonCall(#[from] zbus::Error),

    /// Media layer error
    #[error(transparent)]
    Media(#[from] MediaError),
}

/// A specialized `Result` type for controller operations.
pub type Result<T> = result::Result<T, ControllerError>;

impl ControllerError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => clean_path(p).to_string_lossy().to_string(),
            None => "string".to_string(),
        };

        ControllerError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }
}

fn clean_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
