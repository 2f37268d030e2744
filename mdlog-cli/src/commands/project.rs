//! Shared setup for commands that talk to the remote blog.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use mdlog_blogger::{auth, http_client, BloggerBlog, BloggerConfig, Credentials, Token, TokenSource};
use mdlog_core::config::{self, Config};
use mdlog_sync::SyncService;

const AUTH_STATE: &str = "blogger-state";

/// The mdlog project in the current directory.
pub struct Project {
    pub dir: PathBuf,
    pub config: Config,
}

impl Project {
    pub fn open() -> Result<Self> {
        let dir = std::env::current_dir().context("cannot determine current directory")?;
        let config = config::load_at(&dir).context("cannot get config")?;
        Ok(Self { dir, config })
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.config.posts_dir_at(&self.dir)
    }

    /// Authenticate and resolve the blog, prompting for a consent code when
    /// no token is cached yet.
    pub async fn connect(&self) -> Result<SyncService<BloggerBlog>> {
        let blogger = BloggerConfig::new(&self.config.blogger_url);
        let http = http_client().context("cannot build HTTP client")?;

        let credential_path = self.config.credential_path_at(&self.dir);
        let credentials = Credentials::load(&credential_path).context("cannot get token")?;

        let cache_path = self.config.cache_path_at(&self.dir);
        let token = match Token::load(&cache_path).context("cannot get token")? {
            Some(token) => {
                tracing::debug!("using cached token from {}", cache_path.display());
                token
            }
            None => {
                let code = prompt_code(&credentials.auth_url(&blogger, AUTH_STATE))?;
                let token = auth::exchange_code(&http, &blogger, &credentials, &code)
                    .await
                    .context("cannot get token")?;
                token
                    .save(&cache_path)
                    .context("cannot write token cache")?;
                tracing::info!("cached new token at {}", cache_path.display());
                token
            }
        };

        let tokens = TokenSource::new(http.clone(), blogger.clone(), credentials, token, Some(cache_path));
        let blog = BloggerBlog::connect(http, blogger, tokens)
            .await
            .with_context(|| format!("cannot connect to {}", self.config.blogger_url))?;

        let service = SyncService::new(blog);
        Ok(match self.config.concurrency {
            Some(limit) => service.with_concurrency(limit),
            None => service,
        })
    }
}

fn prompt_code(auth_url: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    writeln!(stderr, "Open this URL and authorize mdlog:\n{auth_url}")?;
    write!(stderr, "Code: ")?;
    stderr.flush()?;

    let mut code = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut code)
        .context("cannot read authorization code")?;
    let code = code.trim().to_string();
    if code.is_empty() {
        bail!("authorization code is required");
    }
    Ok(code)
}
