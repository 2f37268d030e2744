//! `mdlog plan`: print the change list without writing anything.

use anyhow::Result;
use clap::Args;

use mdlog_sync::pipeline::{self, SyncMode};
use mdlog_sync::render_change_list;

use super::project::Project;

#[derive(Args, Debug)]
pub struct PlanArgs {}

impl PlanArgs {
    pub async fn run(self) -> Result<()> {
        let project = Project::open()?;
        let service = project.connect().await?;

        let outcome = pipeline::run(&service, &project.posts_dir(), SyncMode::DryRun).await?;
        match outcome.change_set() {
            Some(changes) => print!("{}", render_change_list(changes)),
            None => println!("local posts are up to date with remote posts"),
        }
        Ok(())
    }
}
