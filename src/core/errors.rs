//! Shared error types for the application shell
//!
//! The metrics engine itself never fails; these errors come from loading
//! configuration and snapshot files and from the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for healthhive operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Snapshot file could not be read or decoded
    #[error("Snapshot error in {}: {message}", path.display())]
    Snapshot { message: String, path: PathBuf },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error without path context
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path context
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn snapshot(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Snapshot {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result alias for healthhive operations
pub type Result<T> = std::result::Result<T, Error>;
