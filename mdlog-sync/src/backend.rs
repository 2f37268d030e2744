//! The remote blog, as seen by the sync core.

use async_trait::async_trait;

use mdlog_core::Post;

use crate::error::BackendError;

/// Capabilities the planner and executor need from a remote blog.
///
/// Implementations must be safe to call concurrently: the executor issues
/// one `update_post` per changed post at the same time. No call is atomic
/// with any other call.
#[async_trait]
pub trait Blog: Send + Sync {
    /// Every post currently known remotely, drafts and published alike.
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError>;

    /// Replace title, content and tags of the post with `post.id`, then move
    /// it to `post.status` if its remote status differs.
    ///
    /// Content and status are separate remote writes, so a failure can leave
    /// one applied without the other.
    async fn update_post(&self, post: &Post) -> Result<(), BackendError>;

    /// Allocate a new remote post as a draft and return it with its
    /// assigned id.
    async fn create_post(&self) -> Result<Post, BackendError>;
}

#[async_trait]
impl<B: Blog + ?Sized> Blog for std::sync::Arc<B> {
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError> {
        (**self).list_posts().await
    }

    async fn update_post(&self, post: &Post) -> Result<(), BackendError> {
        (**self).update_post(post).await
    }

    async fn create_post(&self) -> Result<Post, BackendError> {
        (**self).create_post().await
    }
}
