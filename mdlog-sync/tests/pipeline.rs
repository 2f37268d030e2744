mod common;

use std::fs;

use common::MemoryBlog;
use mdlog_core::{Post, PostStatus};
use mdlog_renderer::parse_post;
use mdlog_sync::pipeline::{run, SyncMode};
use mdlog_sync::{render_change_list, PipelineError, SyncOutcome, SyncService};
use tempfile::TempDir;

const HELLO: &str = "---\nid: \"1\"\ntitle: Hello\ntags: [rust]\nstatus: 1\n---\n\n# Hi\n";

fn posts_dir() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("hello.md"), HELLO).expect("write post");
    dir
}

#[tokio::test]
async fn dry_run_reports_without_pushing() {
    let dir = posts_dir();
    let service = SyncService::new(MemoryBlog::with_posts([Post::draft("1")]));

    let outcome = run(&service, dir.path(), SyncMode::DryRun).await.expect("run");
    let SyncOutcome::WouldApply(changes) = outcome else {
        panic!("expected WouldApply, got {outcome:?}");
    };
    let listing = render_change_list(&changes);
    assert!(listing.contains("<< Post [1] >>"));
    assert!(listing.contains("Title:  -> Hello"));
    assert!(listing.contains("Status: DRAFT -> PUBLISHED"));
    assert!(service.blog().pushes().is_empty());
}

#[tokio::test]
async fn apply_pushes_rendered_post_and_second_run_is_up_to_date() {
    let dir = posts_dir();
    let service = SyncService::new(MemoryBlog::with_posts([Post::draft("1")]));

    let outcome = run(&service, dir.path(), SyncMode::Apply).await.expect("run");
    assert!(matches!(outcome, SyncOutcome::Applied(ref c) if c.len() == 1));

    let expected = parse_post(HELLO.as_bytes()).expect("parse");
    let stored = service.blog().stored("1").expect("stored");
    assert_eq!(stored, expected);
    assert_eq!(stored.status, PostStatus::Published);

    let again = run(&service, dir.path(), SyncMode::Apply).await.expect("rerun");
    assert_eq!(again, SyncOutcome::UpToDate);
}

#[tokio::test]
async fn unparsable_post_is_local_error() {
    let dir = posts_dir();
    fs::write(dir.path().join("bad.md"), "---\ntitle: [unclosed\n").expect("write");
    let service = SyncService::new(MemoryBlog::with_posts([Post::draft("1")]));

    let err = run(&service, dir.path(), SyncMode::Apply).await.unwrap_err();
    assert!(matches!(err, PipelineError::Local(_)), "got {err:?}");
    assert!(service.blog().pushes().is_empty());
}

#[tokio::test]
async fn unknown_id_is_sync_error() {
    let dir = posts_dir();
    let service = SyncService::new(MemoryBlog::with_posts([Post::draft("2")]));

    let err = run(&service, dir.path(), SyncMode::DryRun).await.unwrap_err();
    assert!(err.to_string().contains("unregistered local post: Hello[1]"), "got {err}");
}
