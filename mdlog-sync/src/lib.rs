//! # mdlog-sync
//!
//! Reconciles local posts with a remote blog and pushes local edits.
//!
//! - [`plan`] diffs local against remote posts into a [`ChangeSet`] (pure).
//! - [`SyncService`] applies a change set concurrently through a [`Blog`]
//!   backend and, when any update fails, re-pushes every remote snapshot to
//!   undo the partial application.
//! - [`pipeline::run`] is the entrypoint used by the CLI: load local posts,
//!   then plan or sync.

pub mod backend;
pub mod diff;
pub mod error;
pub mod executor;
pub mod local;
pub mod pipeline;
pub mod plan;

pub use backend::Blog;
pub use diff::render_change_list;
pub use error::{
    BackendError, EntryError, Failures, LocalError, Phase, PipelineError, SyncError,
    UnregisteredPostError,
};
pub use executor::{SyncOutcome, SyncService};
pub use pipeline::SyncMode;
pub use plan::{plan, Change, ChangeSet, FieldChange};
