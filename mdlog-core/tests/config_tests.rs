//! Config error-message, atomic-write-safety, and init integration tests.

use assert_fs::prelude::*;
use mdlog_core::{config, Config, ConfigError};
use predicates::prelude::predicate;
use std::fs;
use std::path::PathBuf;

fn url() -> &'static str {
    "https://example.blogspot.com"
}

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_config_returns_not_initialized() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = config::load_at(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotInitialized { .. }), "got: {err}");
    assert!(err.to_string().contains("not initialized directory"));
    assert!(err.to_string().contains("blogger.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("blogger.yaml")
        .write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = config::load_at(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("blogger.yaml"), "must contain file path, got: {err}");
}

#[test]
fn load_without_url_is_a_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("blogger.yaml").write_str("posts_path: ./p\n").expect("write");

    let err = config::load_at(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn load_empty_url_fails_validation() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("blogger.yaml").write_str("blogger_url: \"\"\n").expect("write");

    let err = config::load_at(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField("blogger_url")), "got: {err}");
}

#[test]
fn load_fills_defaults_for_absent_fields() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("blogger.yaml")
        .write_str("blogger_url: https://example.blogspot.com\nposts_path: ./articles\n")
        .expect("write");

    let loaded = config::load_at(dir.path()).expect("load");
    assert_eq!(loaded.posts_path, PathBuf::from("./articles"));
    assert_eq!(loaded.credential_path, PathBuf::from("./credentials.json"));
    assert_eq!(loaded.cache_path, PathBuf::from("./.blogger.token"));
    assert!(loaded.concurrency.is_none());
}

#[test]
fn zero_concurrency_is_rejected() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("blogger.yaml")
        .write_str("blogger_url: https://example.blogspot.com\nconcurrency: 0\n")
        .expect("write");

    assert!(config::load_at(dir.path()).is_err());
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn mid_write_crash_leaves_original_intact() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    config::save_at(dir.path(), &Config::new(url())).expect("save");

    let path = config::config_path_at(dir.path());
    let original_bytes = fs::read(&path).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = path.with_file_name("blogger.yaml.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let current_bytes = fs::read(&path).expect("read after crash");
    assert_eq!(original_bytes, current_bytes, "original must be unchanged after crash");
    assert_eq!(config::load_at(dir.path()).expect("load").blogger_url, url());
}

// ---------------------------------------------------------------------------
// 3. Init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_config_and_posts_dir() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    config::init_at(dir.path(), &Config::new(url())).expect("init");

    dir.child("blogger.yaml").assert(predicate::path::exists());
    dir.child("posts").assert(predicate::path::is_dir());
}

#[test]
fn init_rejects_invalid_config_without_touching_disk() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = config::init_at(dir.path(), &Config::new("")).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField("blogger_url")));
    dir.child("blogger.yaml").assert(predicate::path::missing());
    dir.child("posts").assert(predicate::path::missing());
}

#[test]
fn init_keeps_existing_posts() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("posts/hello.md").write_str("---\nid: \"1\"\n---\n").expect("write");

    config::init_at(dir.path(), &Config::new(url())).expect("init");
    dir.child("posts/hello.md").assert(predicate::path::exists());
}
