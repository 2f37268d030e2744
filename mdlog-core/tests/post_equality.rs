//! Equality-law tests for `Post`.
//!
//! Each `#[case]` is isolated; no shared state.

use mdlog_core::{Post, PostId, PostStatus};
use rstest::rstest;

fn base() -> Post {
    Post {
        id: PostId::from("1"),
        title: "A".to_string(),
        content: "x".to_string(),
        tags: vec!["go".to_string(), "rust".to_string()],
        status: PostStatus::Draft,
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn equality_is_reflexive() {
    let p = base();
    assert_eq!(p, p);
    assert_eq!(p, p.clone());
}

#[rstest]
#[case::id(Post { id: PostId::from("2"), ..base() })]
#[case::title(Post { title: "B".to_string(), ..base() })]
#[case::content(Post { content: "y".to_string(), ..base() })]
#[case::status(Post { status: PostStatus::Published, ..base() })]
#[case::tags_shorter(Post { tags: tags(&["go"]), ..base() })]
#[case::tags_longer(Post { tags: tags(&["go", "rust", "web"]), ..base() })]
#[case::tags_reordered(Post { tags: tags(&["rust", "go"]), ..base() })]
#[case::tags_element(Post { tags: tags(&["go", "zig"]), ..base() })]
#[case::tags_empty(Post { tags: vec![], ..base() })]
fn single_field_difference_breaks_equality(#[case] other: Post) {
    let p = base();
    assert_ne!(p, other);
    assert_ne!(other, p, "equality must be symmetric");
}

#[test]
fn structurally_identical_posts_are_equal_both_ways() {
    let a = base();
    let b = Post {
        id: PostId::from(String::from("1")),
        title: String::from("A"),
        content: String::from("x"),
        tags: tags(&["go", "rust"]),
        status: PostStatus::Draft,
    };
    assert_eq!(a, b);
    assert_eq!(b, a);
}
