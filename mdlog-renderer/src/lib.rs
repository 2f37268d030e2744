//! # mdlog-renderer
//!
//! Turns markdown posts with YAML front matter into [`Post`] values, and
//! renders the front matter skeleton for freshly created posts.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mdlog_renderer::parse_post;
//!
//! fn load(source: &[u8]) {
//!     match parse_post(source) {
//!         Ok(post) => println!("{} ({} bytes of HTML)", post, post.content.len()),
//!         Err(e) => eprintln!("cannot parse post: {e}"),
//!     }
//! }
//! ```
//!
//! [`Post`]: mdlog_core::Post

pub mod error;
pub mod markdown;
pub mod post;
pub mod skeleton;

pub use error::RenderError;
pub use markdown::{render, Rendered};
pub use post::parse_post;
pub use skeleton::Skeleton;
