//! Error types for lineage operations.
//!
//! Traversal and layout never fail: problems with individual components or
//! edges are reported as [`Warning`](crate::warning::Warning)s instead. The
//! errors here cover loading data and configuration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for lineage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The dataset file could not be parsed.
    #[error("Invalid dataset {path}: {source}")]
    Dataset {
        /// Path of the offending dataset file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized Result type for lineage operations.
pub type Result<T> = std::result::Result<T, Error>;
