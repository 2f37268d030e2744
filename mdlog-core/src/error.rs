//! Error types for mdlog-core.

use std::path::PathBuf;

use thiserror::Error;

/// A post failed its invariants and must not be written remotely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("id is required field")]
    MissingId,

    #[error("invalid post status: {0}")]
    UnknownStatus(String),
}

/// All errors that can arise from reading or writing the project config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the offending file.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No `blogger.yaml` in the project directory.
    #[error("not initialized directory: {path} not found (run `mdlog init`)")]
    NotInitialized { path: PathBuf },

    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),
}
