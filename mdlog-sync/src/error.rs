//! Error types for mdlog-sync.
//!
//! | Error                                 | Remote state after the error            |
//! |---------------------------------------|-----------------------------------------|
//! | [`SyncError::Backend`] (list/create)  | untouched (create: at most one new post) |
//! | [`SyncError::Unregistered`]           | untouched                               |
//! | [`SyncError::Aborted`]                | restored to the pre-sync snapshot       |
//! | [`SyncError::FatalInconsistency`]     | unknown; needs manual inspection        |

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use mdlog_core::{PostId, ValidationError};
use mdlog_renderer::RenderError;

/// Failure reported by a [`Blog`](crate::Blog) implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The post was rejected locally before any request was sent.
    #[error("invalid post: {0}")]
    Validation(#[from] ValidationError),

    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The remote API answered with a non-success status.
    #[error("remote API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The remote API answered with a body we could not decode.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Which step of a run a backend failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    List,
    Apply,
    Compensate,
    Create,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::List => write!(f, "list remote posts"),
            Phase::Apply => write!(f, "apply changes"),
            Phase::Compensate => write!(f, "roll back changes"),
            Phase::Create => write!(f, "create post"),
        }
    }
}

/// A single failed update attempt.
#[derive(Debug, Error)]
#[error("post [{post_id}]: {source}")]
pub struct EntryError {
    pub post_id: PostId,
    #[source]
    pub source: BackendError,
}

/// Every failed attempt of one phase, in change-set order.
#[derive(Debug, Default)]
pub struct Failures(pub Vec<EntryError>);

impl Failures {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryError> {
        self.0.iter()
    }

    /// Ids of the posts whose attempt failed.
    pub fn post_ids(&self) -> Vec<&PostId> {
        self.0.iter().map(|e| &e.post_id).collect()
    }
}

impl fmt::Display for Failures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// A local post has no remote counterpart with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unregistered local post: {title}[{id}]")]
pub struct UnregisteredPostError {
    pub title: String,
    pub id: PostId,
}

/// All errors that can end a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Listing or creating failed; nothing was written by this run.
    #[error("cannot {phase}: {source}")]
    Backend {
        phase: Phase,
        #[source]
        source: BackendError,
    },

    /// Planning refused the batch.
    #[error(transparent)]
    Unregistered(#[from] UnregisteredPostError),

    /// Some updates failed and every touched post was restored.
    #[error("cannot sync with remote posts ({} of {attempted} updates failed, rolled back): {failures}", .failures.len())]
    Aborted { attempted: usize, failures: Failures },

    /// Some updates failed and restoring them failed too.
    #[error(
        "remote posts may be inconsistent, rollback failed for {}: {rollback_failures} (original error: {failures})",
        .rollback_failures.len()
    )]
    FatalInconsistency {
        failures: Failures,
        rollback_failures: Failures,
    },
}

impl SyncError {
    /// `true` only when remote state could not be restored. Automated retry
    /// cannot resolve these; a human has to inspect the blog.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::FatalInconsistency { .. })
    }
}

/// Errors gathering local posts.
#[derive(Debug, Error)]
pub enum LocalError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse post {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

/// Errors from [`pipeline::run`](crate::pipeline::run).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot gather local posts: {0}")]
    Local(#[from] LocalError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Convenience constructor for [`LocalError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LocalError {
    LocalError::Io {
        path: path.into(),
        source,
    }
}
