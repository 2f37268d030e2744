//! Shared sync pipeline entrypoint used by the CLI.

use std::path::Path;

use crate::{local, Blog, PipelineError, SyncOutcome, SyncService};

/// Whether a run writes to the remote blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Plan only; report what would change.
    DryRun,
    /// Plan and apply.
    Apply,
}

/// Load every post under `posts_dir`, then plan or sync it against the
/// service's blog.
pub async fn run<B: Blog>(
    service: &SyncService<B>,
    posts_dir: &Path,
    mode: SyncMode,
) -> Result<SyncOutcome, PipelineError> {
    let locals = local::load_posts(posts_dir)?;
    tracing::debug!("gathered {} local posts from {}", locals.len(), posts_dir.display());

    match mode {
        SyncMode::Apply => Ok(service.sync(&locals).await?),
        SyncMode::DryRun => {
            let changes = service.plan(&locals).await?;
            if changes.is_empty() {
                Ok(SyncOutcome::UpToDate)
            } else {
                Ok(SyncOutcome::WouldApply(changes))
            }
        }
    }
}
