//! OAuth2 for the Blogger API: client credentials, cached token, refresh.
//!
//! The CLI drives the first-time consent flow ([`Credentials::auth_url`] then
//! [`exchange_code`]); afterwards [`TokenSource`] serves access tokens from
//! the cache and refreshes them when they expire.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::BloggerConfig;
use crate::error::{io_err, AuthError};

pub const BLOGGER_SCOPE: &str = "https://www.googleapis.com/auth/blogger";

const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Tokens this close to expiry are treated as expired.
const EXPIRY_LEEWAY_SECS: i64 = 10;

// ---------------------------------------------------------------------------
// Client credentials
// ---------------------------------------------------------------------------

/// OAuth client from a Google `credentials.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Deserialize)]
struct CredentialsFile {
    installed: Option<Credentials>,
    web: Option<Credentials>,
}

impl Credentials {
    /// Read the `installed` client, falling back to `web`.
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
        let file: CredentialsFile = serde_json::from_slice(&bytes).map_err(|source| AuthError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        file.installed
            .or(file.web)
            .ok_or_else(|| AuthError::MissingCredentials {
                path: path.to_path_buf(),
            })
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI)
    }

    /// Consent page URL requesting offline access to the Blogger scope.
    pub fn auth_url(&self, config: &BloggerConfig, state: &str) -> String {
        format!(
            "{}/o/oauth2/auth?\
            client_id={}&\
            redirect_uri={}&\
            response_type=code&\
            scope={}&\
            state={}&\
            access_type=offline",
            config.auth_base_url.trim_end_matches('/'),
            urlencoding::encode(&self.client_id),
            urlencoding::encode(self.redirect_uri()),
            urlencoding::encode(BLOGGER_SCOPE),
            urlencoding::encode(state),
        )
    }
}

// ---------------------------------------------------------------------------
// Token cache
// ---------------------------------------------------------------------------

/// Cached OAuth token. Serialized as JSON at the configured `cache_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absent means the token never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry - chrono::Duration::seconds(EXPIRY_LEEWAY_SECS) <= now,
            None => false,
        }
    }

    /// Read the cache. `Ok(None)` when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>, AuthError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(path, e)),
        };
        let token = serde_json::from_slice(&bytes).map_err(|source| AuthError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(token))
    }

    /// Atomically write the cache, readable by the owner only.
    pub fn save(&self, path: &Path) -> Result<(), AuthError> {
        let json = serde_json::to_vec(self).map_err(|source| AuthError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp_path = tmp_sibling(path);
        write_private(&tmp_path, &json).map_err(|e| io_err(&tmp_path, e))?;
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(io_err(path, e));
        }
        Ok(())
    }

    fn from_response(resp: TokenResponse, previous_refresh: Option<String>) -> Self {
        Token {
            access_token: resp.access_token,
            token_type: resp.token_type.unwrap_or_else(|| "Bearer".to_string()),
            refresh_token: resp.refresh_token.or(previous_refresh),
            expiry: resp
                .expires_in
                .map(|secs| Utc::now() + chrono::Duration::seconds(secs)),
        }
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.tmp"))
}

fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut opts = std::fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// ---------------------------------------------------------------------------
// Token endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

async fn request_token(
    http: &Client,
    config: &BloggerConfig,
    form: &[(&str, &str)],
) -> Result<TokenResponse, AuthError> {
    let response = http
        .post(config.token_url())
        .form(form)
        .send()
        .await
        .map_err(|e| AuthError::Exchange(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Exchange(format!("{status}: {body}")));
    }

    response
        .json()
        .await
        .map_err(|e| AuthError::Exchange(format!("invalid token response: {e}")))
}

/// Trade a consent code for a token.
pub async fn exchange_code(
    http: &Client,
    config: &BloggerConfig,
    credentials: &Credentials,
    code: &str,
) -> Result<Token, AuthError> {
    tracing::debug!("exchanging authorization code");
    let resp = request_token(
        http,
        config,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("code", code.trim()),
            ("redirect_uri", credentials.redirect_uri()),
            ("grant_type", "authorization_code"),
        ],
    )
    .await?;
    Ok(Token::from_response(resp, None))
}

async fn refresh(
    http: &Client,
    config: &BloggerConfig,
    credentials: &Credentials,
    refresh_token: &str,
) -> Result<Token, AuthError> {
    tracing::debug!("refreshing access token");
    let resp = request_token(
        http,
        config,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ],
    )
    .await?;
    Ok(Token::from_response(resp, Some(refresh_token.to_string())))
}

// ---------------------------------------------------------------------------
// TokenSource
// ---------------------------------------------------------------------------

/// Hands out valid access tokens, refreshing and re-caching as needed.
/// Shared by every concurrent request of a run.
pub struct TokenSource {
    http: Client,
    config: BloggerConfig,
    credentials: Credentials,
    cache_path: Option<PathBuf>,
    token: RwLock<Token>,
}

impl TokenSource {
    /// `cache_path`, when set, receives every refreshed token.
    pub fn new(
        http: Client,
        config: BloggerConfig,
        credentials: Credentials,
        token: Token,
        cache_path: Option<PathBuf>,
    ) -> Self {
        Self {
            http,
            config,
            credentials,
            cache_path,
            token: RwLock::new(token),
        }
    }

    pub async fn access_token(&self) -> Result<String, AuthError> {
        {
            let token = self.token.read().await;
            if !token.is_expired(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let mut token = self.token.write().await;
        // Another request may have refreshed while we waited for the lock.
        if !token.is_expired(Utc::now()) {
            return Ok(token.access_token.clone());
        }
        let refresh_token = token
            .refresh_token
            .clone()
            .ok_or(AuthError::NotAuthenticated("token expired and no refresh token is cached"))?;

        let fresh = refresh(&self.http, &self.config, &self.credentials, &refresh_token).await?;
        if let Some(path) = &self.cache_path {
            fresh.save(path)?;
            tracing::debug!("cached refreshed token at {}", path.display());
        }
        *token = fresh;
        Ok(token.access_token.clone())
    }
}
