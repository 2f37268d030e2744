//! Executor: applies a [`ChangeSet`] to the remote blog as a saga.
//!
//! ## `sync` protocol
//!
//! 1. List remote posts (failure → [`SyncError::Backend`], nothing written).
//! 2. Plan (failure → [`SyncError::Unregistered`], nothing written).
//! 3. Empty plan → [`SyncOutcome::UpToDate`].
//! 4. Apply: push every local snapshot concurrently; wait for all attempts.
//! 5. All succeeded → [`SyncOutcome::Applied`].
//! 6. Otherwise compensate: push every remote snapshot concurrently (the whole
//!    plan, not only the failed entries) and wait for all attempts.
//!    - all restored → [`SyncError::Aborted`]
//!    - any restore failed → [`SyncError::FatalInconsistency`]
//!
//! Attempts in a phase never cancel each other. Nothing is retried.

use std::num::NonZeroUsize;

use futures::future::join_all;
use futures::stream::{self, StreamExt};

use mdlog_core::Post;

use crate::backend::Blog;
use crate::error::{BackendError, EntryError, Failures, Phase, SyncError};
use crate::plan::{plan, ChangeSet};

/// Successful result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local and remote posts already match; no update was issued.
    UpToDate,
    /// Every change was pushed.
    Applied(ChangeSet),
    /// Dry run: these changes would be pushed.
    WouldApply(ChangeSet),
}

impl SyncOutcome {
    pub fn change_set(&self) -> Option<&ChangeSet> {
        match self {
            SyncOutcome::UpToDate => None,
            SyncOutcome::Applied(set) | SyncOutcome::WouldApply(set) => Some(set),
        }
    }
}

/// Plans and applies local posts against a [`Blog`].
pub struct SyncService<B> {
    blog: B,
    concurrency: Option<NonZeroUsize>,
}

impl<B: Blog> SyncService<B> {
    /// One concurrent update per changed post, without limit.
    pub fn new(blog: B) -> Self {
        Self {
            blog,
            concurrency: None,
        }
    }

    /// Cap the number of in-flight updates per phase. Every attempt still
    /// runs to completion before the phase outcome is decided.
    pub fn with_concurrency(mut self, limit: NonZeroUsize) -> Self {
        self.concurrency = Some(limit);
        self
    }

    pub fn blog(&self) -> &B {
        &self.blog
    }

    /// Fetch remote posts and compute the change set. Writes nothing.
    pub async fn plan(&self, locals: &[Post]) -> Result<ChangeSet, SyncError> {
        let remotes = self
            .blog
            .list_posts()
            .await
            .map_err(|source| SyncError::Backend {
                phase: Phase::List,
                source,
            })?;
        tracing::debug!(
            locals = locals.len(),
            remotes = remotes.len(),
            "planning sync"
        );
        Ok(plan(locals, &remotes)?)
    }

    /// Push every local edit to the remote blog, rolling back on failure.
    pub async fn sync(&self, locals: &[Post]) -> Result<SyncOutcome, SyncError> {
        let changes = self.plan(locals).await?;
        if changes.is_empty() {
            tracing::info!("local posts are up to date with remote posts");
            return Ok(SyncOutcome::UpToDate);
        }

        let failures = self.run_phase(Phase::Apply, changes.locals()).await;
        if failures.is_empty() {
            for post in changes.locals() {
                tracing::info!("updated: {post}");
            }
            return Ok(SyncOutcome::Applied(changes));
        }

        tracing::warn!(
            failed = failures.len(),
            attempted = changes.len(),
            "update failed, rolling back every changed post: {failures}"
        );
        let rollback_failures = self.run_phase(Phase::Compensate, changes.remotes()).await;
        if rollback_failures.is_empty() {
            return Err(SyncError::Aborted {
                attempted: changes.len(),
                failures,
            });
        }

        tracing::error!(
            "ROLLBACK FAILED, remote posts may be inconsistent; inspect {:?} manually: {rollback_failures}",
            rollback_failures.post_ids()
        );
        Err(SyncError::FatalInconsistency {
            failures,
            rollback_failures,
        })
    }

    /// Allocate a new remote draft and return it with only its id set.
    pub async fn create(&self) -> Result<Post, SyncError> {
        let post = self
            .blog
            .create_post()
            .await
            .map_err(|source| SyncError::Backend {
                phase: Phase::Create,
                source,
            })?;
        tracing::info!("created remote draft [{}]", post.id);
        Ok(post)
    }

    /// Push each post concurrently and collect every failure.
    async fn run_phase<'a>(&self, phase: Phase, posts: impl Iterator<Item = &'a Post>) -> Failures {
        let attempts: Vec<_> = posts.map(|post| self.push(phase, post)).collect();
        let results: Vec<Result<(), EntryError>> = match self.concurrency {
            Some(limit) => stream::iter(attempts).buffered(limit.get()).collect().await,
            None => join_all(attempts).await,
        };
        Failures(results.into_iter().filter_map(Result::err).collect())
    }

    async fn push(&self, phase: Phase, post: &Post) -> Result<(), EntryError> {
        let entry_err = |source: BackendError| EntryError {
            post_id: post.id.clone(),
            source,
        };
        post.validate().map_err(|e| entry_err(e.into()))?;
        tracing::debug!(?phase, "pushing {post}");
        self.blog.update_post(post).await.map_err(entry_err)
    }
}
