use serde::{Deserialize, Serialize};

/// Where the blog lives and which Google endpoints to talk to.
///
/// The base URLs only change in tests, where they point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloggerConfig {
    /// Public URL of the blog, e.g. `https://example.blogspot.com`.
    pub blog_url: String,
    pub api_base_url: String,
    pub oauth_base_url: String,
    pub auth_base_url: String,
}

impl BloggerConfig {
    pub fn new(blog_url: impl Into<String>) -> Self {
        Self {
            blog_url: blog_url.into(),
            ..Self::default()
        }
    }

    /// Point API and OAuth calls at a single base URL.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.api_base_url = base.clone();
        self.oauth_base_url = base.clone();
        self.auth_base_url = base;
        self
    }

    pub(crate) fn api(&self, path: &str) -> String {
        format!("{}/blogger/v3{path}", self.api_base_url.trim_end_matches('/'))
    }

    pub(crate) fn token_url(&self) -> String {
        format!("{}/token", self.oauth_base_url.trim_end_matches('/'))
    }
}

impl Default for BloggerConfig {
    fn default() -> Self {
        Self {
            blog_url: String::new(),
            api_base_url: "https://www.googleapis.com".to_string(),
            oauth_base_url: "https://oauth2.googleapis.com".to_string(),
            auth_base_url: "https://accounts.google.com".to_string(),
        }
    }
}
