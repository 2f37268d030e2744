use std::path::PathBuf;

use thiserror::Error;

use mdlog_sync::BackendError;

/// Errors loading credentials or obtaining an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no `installed` or `web` client in {path}")]
    MissingCredentials { path: PathBuf },

    #[error("not authenticated: {0}")]
    NotAuthenticated(&'static str),

    /// The token endpoint refused the code or refresh token.
    #[error("token exchange failed: {0}")]
    Exchange(String),
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        BackendError::Auth(err.to_string())
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> AuthError {
    AuthError::Io {
        path: path.into(),
        source,
    }
}
