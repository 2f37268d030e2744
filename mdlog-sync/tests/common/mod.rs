#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use mdlog_core::{Post, PostId, PostStatus};
use mdlog_sync::{BackendError, Blog};

pub fn post(id: &str, title: &str, content: &str, tags: &[&str], status: PostStatus) -> Post {
    Post {
        id: PostId::from(id),
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status,
    }
}

/// In-memory blog. Updates overwrite stored posts; pushes equal to a post in
/// `fail_on` are rejected without touching state.
#[derive(Default)]
pub struct MemoryBlog {
    posts: Mutex<BTreeMap<PostId, Post>>,
    fail_on: Mutex<Vec<Post>>,
    fail_list: bool,
    delay: Option<Duration>,
    pushes: Mutex<Vec<Post>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    next_id: AtomicUsize,
}

impl MemoryBlog {
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let blog = MemoryBlog::default();
        {
            let mut map = blog.posts.lock().expect("lock");
            for p in posts {
                map.insert(p.id.clone(), p);
            }
        }
        blog
    }

    pub fn failing_list() -> Self {
        MemoryBlog {
            fail_list: true,
            ..MemoryBlog::default()
        }
    }

    /// Every update sleeps for `delay`, so concurrent pushes overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reject any update whose payload equals `post`.
    pub fn fail_when_pushed(self, post: Post) -> Self {
        self.fail_on.lock().expect("lock").push(post);
        self
    }

    pub fn stored(&self, id: &str) -> Option<Post> {
        self.posts.lock().expect("lock").get(&PostId::from(id)).cloned()
    }

    pub fn pushes(&self) -> Vec<Post> {
        self.pushes.lock().expect("lock").clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Blog for MemoryBlog {
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError> {
        if self.fail_list {
            return Err(BackendError::Network("connection refused".to_string()));
        }
        Ok(self.posts.lock().expect("lock").values().cloned().collect())
    }

    async fn update_post(&self, post: &Post) -> Result<(), BackendError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        self.pushes.lock().expect("lock").push(post.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = if self.fail_on.lock().expect("lock").contains(post) {
            Err(BackendError::Api {
                status: 500,
                message: format!("rejected {}", post.id),
            })
        } else {
            self.posts
                .lock()
                .expect("lock")
                .insert(post.id.clone(), post.clone());
            Ok(())
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn create_post(&self) -> Result<Post, BackendError> {
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = Post::draft(id.as_str());
        self.posts
            .lock()
            .expect("lock")
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }
}
