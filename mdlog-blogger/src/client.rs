//! Blogger v3 REST implementation of [`Blog`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use mdlog_core::{Post, PostId, PostStatus};
use mdlog_sync::{BackendError, Blog};

use crate::auth::TokenSource;
use crate::config::BloggerConfig;

const STATUS_LIVE: &str = "LIVE";
const STATUS_DRAFT: &str = "DRAFT";

/// HTTP client with the timeout used for every Blogger and OAuth request.
pub fn http_client() -> reqwest::Result<Client> {
    Client::builder().timeout(Duration::from_secs(60)).build()
}

#[derive(Debug, Deserialize)]
struct BlogResource {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostList {
    #[serde(default)]
    items: Vec<PostResource>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostResource {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    status: String,
}

impl From<PostResource> for Post {
    fn from(p: PostResource) -> Self {
        let status = if p.status == STATUS_LIVE {
            PostStatus::Published
        } else {
            PostStatus::Draft
        };
        Post {
            id: PostId::from(p.id),
            title: p.title,
            content: p.content,
            tags: p.labels,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
struct PostBody<'a> {
    title: &'a str,
    content: &'a str,
    labels: &'a [String],
}

fn remote_status(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Published => STATUS_LIVE,
        PostStatus::Draft => STATUS_DRAFT,
    }
}

/// One blog on Blogger, resolved from its public URL.
pub struct BloggerBlog {
    http: Client,
    config: BloggerConfig,
    tokens: TokenSource,
    blog_id: String,
}

impl BloggerBlog {
    /// Look up the blog id for `config.blog_url`.
    pub async fn connect(
        http: Client,
        config: BloggerConfig,
        tokens: TokenSource,
    ) -> Result<Self, BackendError> {
        let mut blog = Self {
            http,
            config,
            tokens,
            blog_id: String::new(),
        };
        let request = blog
            .http
            .get(blog.config.api("/blogs/byurl"))
            .query(&[("url", blog.config.blog_url.as_str())]);
        let resource: BlogResource = decode(blog.send(request).await?).await?;
        tracing::debug!("resolved {} to blog {}", blog.config.blog_url, resource.id);
        blog.blog_id = resource.id;
        Ok(blog)
    }

    pub fn blog_id(&self) -> &str {
        &self.blog_id
    }

    fn posts_url(&self) -> String {
        self.config
            .api(&format!("/blogs/{}/posts", urlencoding::encode(&self.blog_id)))
    }

    fn post_url(&self, id: &PostId, action: Option<&str>) -> String {
        let base = format!("{}/{}", self.posts_url(), urlencoding::encode(id.as_str()));
        match action {
            Some(action) => format!("{base}/{action}"),
            None => base,
        }
    }

    /// Authorize, send, and map non-2xx responses to [`BackendError::Api`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let token = self.tokens.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message: api_message(&message),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response
        .json()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// Pull `error.message` out of a Google error body, else keep the raw body.
fn api_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl Blog for BloggerBlog {
    async fn list_posts(&self) -> Result<Vec<Post>, BackendError> {
        let mut posts = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self.http.get(self.posts_url()).query(&[
                ("status", "live"),
                ("status", "draft"),
                ("fetchBodies", "true"),
            ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let page: PostList = decode(self.send(request).await?).await?;
            posts.extend(page.items.into_iter().map(Post::from));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        tracing::debug!("listed {} remote posts", posts.len());
        Ok(posts)
    }

    async fn update_post(&self, post: &Post) -> Result<(), BackendError> {
        post.validate()?;

        let body = PostBody {
            title: &post.title,
            content: &post.content,
            labels: &post.tags,
        };
        let request = self.http.put(self.post_url(&post.id, None)).json(&body);
        let updated: PostResource = decode(self.send(request).await?).await?;

        let wanted = remote_status(post.status);
        if updated.status != wanted {
            let action = match post.status {
                PostStatus::Published => "publish",
                PostStatus::Draft => "revert",
            };
            tracing::debug!("{action} [{}]: {} -> {wanted}", post.id, updated.status);
            self.send(self.http.post(self.post_url(&post.id, Some(action))))
                .await?;
        }
        Ok(())
    }

    async fn create_post(&self) -> Result<Post, BackendError> {
        let request = self.http.post(self.posts_url()).json(&serde_json::json!({}));
        let created: PostResource = decode(self.send(request).await?).await?;
        let id = PostId::from(created.id);

        self.send(self.http.post(self.post_url(&id, Some("revert"))))
            .await?;
        Ok(Post::draft(id))
    }
}
