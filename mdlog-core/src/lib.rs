//! mdlog core library: post model, validation, project config, errors.
//!
//! - [`types`]: [`Post`], [`PostId`], [`PostStatus`]
//! - [`error`]: [`ValidationError`], [`ConfigError`]
//! - [`config`]: load / save / init of `blogger.yaml`

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, ValidationError};
pub use types::{Post, PostId, PostStatus};
