//! Error types for mdlog-renderer.

use std::path::PathBuf;

use thiserror::Error;

use mdlog_core::ValidationError;

/// All errors that can arise while turning markdown into a post.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Post source is not UTF-8.
    #[error("post is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Front matter is not a YAML mapping.
    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    /// Opening `---` without a closing `---`.
    #[error("front matter is not terminated by `---`")]
    UnterminatedFrontMatter,

    /// Parsed post fails its invariants.
    #[error("invalid post: {0}")]
    Validation(#[from] ValidationError),

    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while loading a user template.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
