//! Project configuration, persisted as `blogger.yaml`.
//!
//! # Layout
//!
//! ```text
//! <project>/
//!   blogger.yaml        (this config)
//!   credentials.json    (OAuth client, default credential_path)
//!   .blogger.token      (token cache, default cache_path)
//!   posts/              (local markdown posts, default posts_path)
//! ```
//!
//! Relative paths inside the config are resolved against the project
//! directory, never against the process working directory.
//!
//! # API pattern
//!
//! Every function takes the project directory explicitly (`_at(dir, …)`), so
//! tests can point it at a `TempDir`.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the project config inside the project directory.
pub const CONFIG_FILE: &str = "blogger.yaml";

pub const DEFAULT_CREDENTIAL_PATH: &str = "./credentials.json";
pub const DEFAULT_CACHE_PATH: &str = "./.blogger.token";
pub const DEFAULT_POSTS_PATH: &str = "./posts";

/// Contents of `blogger.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub blogger_url: String,
    #[serde(default = "default_credential_path")]
    pub credential_path: PathBuf,
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default = "default_posts_path")]
    pub posts_path: PathBuf,
    /// Upper bound on concurrent remote updates; absent means one task per post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<NonZeroUsize>,
    /// Tera template used by `mdlog create` instead of the embedded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeleton_path: Option<PathBuf>,
}

fn default_credential_path() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIAL_PATH)
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_posts_path() -> PathBuf {
    PathBuf::from(DEFAULT_POSTS_PATH)
}

impl Config {
    /// A config with every optional field at its default.
    pub fn new(blogger_url: impl Into<String>) -> Self {
        Self {
            blogger_url: blogger_url.into(),
            credential_path: default_credential_path(),
            cache_path: default_cache_path(),
            posts_path: default_posts_path(),
            concurrency: None,
            skeleton_path: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blogger_url.trim().is_empty() {
            return Err(ConfigError::MissingField("blogger_url"));
        }
        if self.credential_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("credential_path"));
        }
        if self.cache_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("cache_path"));
        }
        if self.posts_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("posts_path"));
        }
        Ok(())
    }

    pub fn credential_path_at(&self, dir: &Path) -> PathBuf {
        dir.join(&self.credential_path)
    }

    pub fn cache_path_at(&self, dir: &Path) -> PathBuf {
        dir.join(&self.cache_path)
    }

    pub fn posts_dir_at(&self, dir: &Path) -> PathBuf {
        dir.join(&self.posts_path)
    }

    pub fn skeleton_path_at(&self, dir: &Path) -> Option<PathBuf> {
        self.skeleton_path.as_ref().map(|p| dir.join(p))
    }
}

/// `<dir>/blogger.yaml`. Pure, no I/O.
pub fn config_path_at(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Load and validate `<dir>/blogger.yaml`.
///
/// Returns `ConfigError::NotInitialized` if absent,
/// `ConfigError::Parse` (with path) if malformed.
pub fn load_at(dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(dir);
    if !path.exists() {
        return Err(ConfigError::NotInitialized { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    let config: Config =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?;
    config.validate()?;
    Ok(config)
}

/// Atomically save `<dir>/blogger.yaml`.
///
/// Write flow: serialize → `blogger.yaml.tmp` sibling → `rename`.
pub fn save_at(dir: &Path, config: &Config) -> Result<(), ConfigError> {
    let path = config_path_at(dir);
    let tmp_path = path.with_file_name(format!("{CONFIG_FILE}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Initialize a project directory: validate, write the config, create the
/// posts directory.
///
/// Overwrites an existing config; the posts directory is left intact.
pub fn init_at(dir: &Path, config: &Config) -> Result<(), ConfigError> {
    config.validate()?;
    std::fs::create_dir_all(dir)?;
    save_at(dir, config)?;
    std::fs::create_dir_all(config.posts_dir_at(dir))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
