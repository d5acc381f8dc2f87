//! Logging error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur inside the logger
///
/// Only `Configuration` ever reaches a caller, from named logger construction.
/// The other variants come out of the internal write path and are dropped at
/// the public boundary.
#[derive(Error, Debug)]
pub enum LogError {
    /// Invalid logger construction
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Directory creation, open, append or rename failure
    #[error("File system error on {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed message template
    #[error("Format error: {0}")]
    Format(String),
}

impl LogError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a file system error
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

pub type LogResult<T> = Result<T, LogError>;
