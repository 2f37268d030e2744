//! `mdlog init --url <blogger url> [--credential ..] [--cache ..] [--posts ..]`

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mdlog_core::config::{
    self, Config, DEFAULT_CACHE_PATH, DEFAULT_CREDENTIAL_PATH, DEFAULT_POSTS_PATH,
};

/// Initialize the current directory as an mdlog project.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Your blogger url, e.g. https://example.blogspot.com
    #[arg(long)]
    pub url: String,

    /// credentials.json for google oauth2.
    #[arg(long, default_value = DEFAULT_CREDENTIAL_PATH)]
    pub credential: PathBuf,

    /// Destination of the access token cache file.
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    pub cache: PathBuf,

    /// Directory for your local posts.
    #[arg(long, default_value = DEFAULT_POSTS_PATH)]
    pub posts: PathBuf,

    /// Upper bound on concurrent remote updates during sync.
    #[arg(long)]
    pub concurrency: Option<NonZeroUsize>,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let dir = std::env::current_dir().context("cannot determine current directory")?;

        let config = Config {
            credential_path: self.credential,
            cache_path: self.cache,
            posts_path: self.posts,
            concurrency: self.concurrency,
            ..Config::new(self.url)
        };
        config::init_at(&dir, &config).context("invalid config")?;

        println!("✓ Initialized mdlog project for {}", config.blogger_url);
        println!("  Config: {}", config::config_path_at(&dir).display());
        println!("  Posts:  {}", config.posts_dir_at(&dir).display());
        Ok(())
    }
}
