//! Error handling for the roadside binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for roadside operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while replaying a session.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The async runtime could not be started.
    #[error("Failed to start runtime: {0}")]
    Runtime(io::Error),
    /// Configuration parsing or resolution errors.
    #[error("Configuration error: {}", .0.pretty())]
    Config(#[from] roadside_config::Error),
    /// The session script is not valid RON.
    #[error("Script error: {0}")]
    Script(#[from] ron::error::SpannedError),
    /// An event carried JSON arguments that do not parse.
    #[error("Invalid JSON in event {index}: {source}")]
    Json {
        /// Zero-based index of the event in the script.
        index: usize,
        /// Underlying error.
        source: serde_json::Error,
    },
}
