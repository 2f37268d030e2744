//! `mdlog create --name <file.md>`

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use mdlog_renderer::Skeleton;

use super::project::Project;

/// Create a remote draft and write its front matter skeleton locally.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// File name of the new post, relative to the posts directory.
    #[arg(long)]
    pub name: PathBuf,
}

impl CreateArgs {
    pub async fn run(self) -> Result<()> {
        check_name(&self.name)?;
        let project = Project::open()?;

        let path = project.posts_dir().join(&self.name);
        if path.exists() {
            bail!("file already exists: {}", path.display());
        }
        let skeleton = Skeleton::new(project.config.skeleton_path_at(&project.dir).as_deref())
            .context("cannot load post template")?;

        let service = project.connect().await?;
        let post = service.create().await?;
        let contents = skeleton.render(&post).context("cannot render post skeleton")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("cannot write post file {}", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("cannot write post file {}", path.display()))?;

        println!("✓ Created draft [{}] at {}", post.id, path.display());
        Ok(())
    }
}

fn check_name(name: &Path) -> Result<()> {
    if name.as_os_str().is_empty() {
        bail!("file name is required");
    }
    match name.extension().and_then(|e| e.to_str()) {
        Some("md") => Ok(()),
        other => bail!(
            "file name should have .md extension: {}",
            other.map(|e| format!(".{e}")).unwrap_or_default()
        ),
    }
}
