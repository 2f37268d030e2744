//! mdlog: write Blogger posts as local markdown files.
//!
//! # Usage
//!
//! ```text
//! mdlog init --url <blogger url> [--credential <path>] [--cache <path>] [--posts <dir>]
//! mdlog create --name <file.md>
//! mdlog plan
//! mdlog sync [--dry-run]
//! ```
//!
//! Every command works on the project in the current directory. Log verbosity
//! is controlled by `MDLOG_LOG` (default `info`); logs go to stderr.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{create::CreateArgs, init::InitArgs, plan::PlanArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mdlog",
    version,
    about = "Keep a Blogger blog in sync with local markdown posts",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write blogger.yaml in the current directory and create the posts directory.
    Init(InitArgs),

    /// Create a remote draft and a local markdown file bound to it.
    Create(CreateArgs),

    /// Show what `sync` would change on the remote blog.
    Plan(PlanArgs),

    /// Push local edits to the remote blog, rolling back on failure.
    Sync(SyncArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MDLOG_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Create(args) => runtime.block_on(args.run()),
        Commands::Plan(args) => runtime.block_on(args.run()),
        Commands::Sync(args) => runtime.block_on(args.run()),
    }
}
