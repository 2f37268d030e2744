//! `mdlog sync [--dry-run]`: push local edits to the remote blog.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use mdlog_sync::pipeline::{self, SyncMode};
use mdlog_sync::{ChangeSet, FieldChange, PipelineError, SyncOutcome};

use super::project::Project;

/// Arguments for `mdlog sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Show which posts would be updated without touching the remote blog.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Tabled)]
struct UpdatedRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "changed")]
    changed: String,
}

impl SyncArgs {
    pub async fn run(self) -> Result<()> {
        let project = Project::open()?;
        let service = project.connect().await?;
        let mode = if self.dry_run {
            SyncMode::DryRun
        } else {
            SyncMode::Apply
        };

        match pipeline::run(&service, &project.posts_dir(), mode).await {
            Ok(outcome) => {
                print_outcome(&outcome);
                Ok(())
            }
            Err(PipelineError::Sync(err)) if err.is_fatal() => {
                eprintln!(
                    "{}",
                    "✗ ROLLBACK FAILED: remote posts may be inconsistent. Inspect them on Blogger before syncing again."
                        .red()
                        .bold()
                );
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn print_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::UpToDate => println!("local posts are up to date with remote posts"),
        SyncOutcome::Applied(changes) => {
            println!("✓ updated {} post(s)", changes.len());
            println!("{}", table(changes));
        }
        SyncOutcome::WouldApply(changes) => {
            println!("[dry-run] would update {} post(s)", changes.len());
            println!("{}", table(changes));
        }
    }
}

fn table(changes: &ChangeSet) -> Table {
    let rows: Vec<UpdatedRow> = changes
        .changes()
        .map(|change| UpdatedRow {
            id: change.local.id.to_string(),
            title: change.local.title.clone(),
            status: change.local.status.to_string(),
            changed: change
                .field_changes()
                .iter()
                .map(field_name)
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

fn field_name(field: &FieldChange) -> &'static str {
    match field {
        FieldChange::Title { .. } => "title",
        FieldChange::Content => "content",
        FieldChange::Tags { .. } => "tags",
        FieldChange::Status { .. } => "status",
    }
}
