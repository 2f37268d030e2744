//! Gather local posts from the posts directory.

use std::path::{Path, PathBuf};

use mdlog_core::Post;
use mdlog_renderer::parse_post;

use crate::error::{io_err, LocalError};

/// Recursively collect `*.md` files under `dir`, sorted by path.
pub fn find_post_files(dir: &Path) -> Result<Vec<PathBuf>, LocalError> {
    let mut files = Vec::new();
    collect_post_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_post_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LocalError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_post_files(&path, out)?;
        } else if meta.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            out.push(path);
        }
    }
    Ok(())
}

/// Parse every post under `dir`. The first unreadable or invalid file aborts
/// the whole load.
pub fn load_posts(dir: &Path) -> Result<Vec<Post>, LocalError> {
    let mut posts = Vec::new();
    for path in find_post_files(dir)? {
        let source = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        let post = parse_post(&source).map_err(|source| LocalError::Render {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("loaded {post} from {}", path.display());
        posts.push(post);
    }
    Ok(posts)
}
