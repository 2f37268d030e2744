//! Front matter → [`Post`].
//!
//! Recognised keys: `id`, `title`, `tags`, `status`. Unknown keys are ignored.

use serde_yaml::{Mapping, Value};

use mdlog_core::{Post, PostId, PostStatus, ValidationError};

use crate::error::RenderError;
use crate::markdown::render;

/// Parse a markdown post and validate it.
///
/// `status` may be the numeric code (`0` draft, `1` published) or the status
/// name; when absent the post is a draft.
pub fn parse_post(source: &[u8]) -> Result<Post, RenderError> {
    let rendered = render(source)?;
    let post = post_from_meta(&rendered.meta, rendered.content)?;
    post.validate()?;
    Ok(post)
}

fn post_from_meta(meta: &Mapping, content: String) -> Result<Post, ValidationError> {
    let id = meta.get("id").and_then(scalar_to_string).unwrap_or_default();
    let title = meta.get("title").and_then(scalar_to_string).unwrap_or_default();

    let tags = match meta.get("tags") {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(single)) if !single.is_empty() => vec![single.clone()],
        _ => Vec::new(),
    };

    let status = match meta.get("status") {
        None | Some(Value::Null) => PostStatus::Draft,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(code) => PostStatus::from_code(code)?,
            None => return Err(ValidationError::UnknownStatus(n.to_string())),
        },
        Some(Value::String(s)) => s.parse()?,
        Some(other) => return Err(ValidationError::UnknownStatus(format!("{other:?}"))),
    };

    Ok(Post {
        id: PostId::from(id),
        title,
        content,
        tags,
        status,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
