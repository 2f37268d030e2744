//! # mdlog-blogger
//!
//! Blogger v3 REST backend for mdlog.
//!
//! - [`auth`] loads the OAuth client from `credentials.json`, caches the
//!   token on disk and refreshes it when it expires.
//! - [`BloggerBlog`] implements [`mdlog_sync::Blog`] on top of the Blogger
//!   v3 API.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use auth::{Credentials, Token, TokenSource};
pub use client::{http_client, BloggerBlog};
pub use config::BloggerConfig;
pub use error::AuthError;
