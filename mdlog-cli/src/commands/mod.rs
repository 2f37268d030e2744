pub mod create;
pub mod init;
pub mod plan;
pub mod project;
pub mod sync;
