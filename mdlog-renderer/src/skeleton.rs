//! Front matter skeleton for newly created posts.
//!
//! The embedded template is baked into the binary via `include_str!`; a user
//! template file can replace it. Template variables: `id`, `title`, `tags`,
//! `status` (numeric code) and `status_name`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};

use mdlog_core::Post;

use crate::error::RenderError;

const TEMPLATE_NAME: &str = "post.md.tera";
const POST_TEMPLATE: &str = include_str!("templates/post.md.tera");

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

#[derive(Serialize)]
struct SkeletonContext<'a> {
    id: &'a str,
    title: &'a str,
    tags: &'a [String],
    status: i64,
    status_name: String,
}

impl<'a> SkeletonContext<'a> {
    fn from_post(post: &'a Post) -> Self {
        Self {
            id: post.id.as_str(),
            title: &post.title,
            tags: &post.tags,
            status: post.status.code(),
            status_name: post.status.to_string().to_lowercase(),
        }
    }
}

/// Tera renderer for the new-post skeleton. Create once and reuse.
pub struct Skeleton {
    tera: Tera,
}

impl Skeleton {
    /// Build with the embedded template, or with `user_template` when given.
    pub fn new(user_template: Option<&Path>) -> Result<Self, RenderError> {
        let source = match user_template {
            Some(path) => std::fs::read_to_string(path).map_err(|e| io_err(path, e))?,
            None => POST_TEMPLATE.to_string(),
        };
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, &source)?;
        Ok(Skeleton { tera })
    }

    /// Render the markdown file contents for `post`. Output uses LF endings.
    pub fn render(&self, post: &Post) -> Result<String, RenderError> {
        let ctx = Context::from_serialize(SkeletonContext::from_post(post))?;
        let rendered = self.tera.render(TEMPLATE_NAME, &ctx)?;
        Ok(rendered.replace("\r\n", "\n"))
    }
}
