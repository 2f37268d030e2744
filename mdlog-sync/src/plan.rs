//! Planner: local posts + remote posts → [`ChangeSet`].
//!
//! Pure: no I/O, no concurrency. Remotes are indexed by id, then each local
//! post is looked up in input order.

use std::collections::{BTreeMap, HashMap};

use mdlog_core::{Post, PostId, PostStatus};

use crate::error::UnregisteredPostError;

/// The before/after pair for one post.
///
/// `remote` and `local` are independent clones; `remote` is the rollback
/// target if applying `local` fails anywhere in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub remote: Post,
    pub local: Post,
}

/// A single differing field between `remote` and `local`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Title { from: String, to: String },
    Content,
    Tags { from: Vec<String>, to: Vec<String> },
    Status { from: PostStatus, to: PostStatus },
}

impl Change {
    /// Fields that differ, in display order (title, content, tags, status).
    pub fn field_changes(&self) -> Vec<FieldChange> {
        let (r, l) = (&self.remote, &self.local);
        let mut out = Vec::new();
        if r.title != l.title {
            out.push(FieldChange::Title {
                from: r.title.clone(),
                to: l.title.clone(),
            });
        }
        if r.content != l.content {
            out.push(FieldChange::Content);
        }
        if r.tags != l.tags {
            out.push(FieldChange::Tags {
                from: r.tags.clone(),
                to: l.tags.clone(),
            });
        }
        if r.status != l.status {
            out.push(FieldChange::Status {
                from: r.status,
                to: l.status,
            });
        }
        out
    }
}

/// Posts selected for update, keyed by id.
///
/// Never mutated once planning completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: BTreeMap<PostId, Change>,
}

impl ChangeSet {
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn get(&self, id: &PostId) -> Option<&Change> {
        self.changes.get(id)
    }

    /// Changes ordered by post id.
    pub fn iter(&self) -> impl Iterator<Item = (&PostId, &Change)> {
        self.changes.iter()
    }

    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.changes.values()
    }

    /// Snapshots to push forward.
    pub fn locals(&self) -> impl Iterator<Item = &Post> {
        self.changes.values().map(|c| &c.local)
    }

    /// Snapshots to restore on rollback.
    pub fn remotes(&self) -> impl Iterator<Item = &Post> {
        self.changes.values().map(|c| &c.remote)
    }

    fn insert(&mut self, remote: &Post, local: &Post) {
        self.changes.insert(
            local.id.clone(),
            Change {
                remote: remote.clone(),
                local: local.clone(),
            },
        );
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a PostId, &'a Change);
    type IntoIter = std::collections::btree_map::Iter<'a, PostId, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Compute the change set that brings `remotes` in line with `locals`.
///
/// - a local post equal to its remote counterpart is skipped;
/// - a local post whose id is not among `remotes` aborts planning with
///   [`UnregisteredPostError`] and no partial plan is returned;
/// - duplicate remote ids: the last one wins.
pub fn plan(locals: &[Post], remotes: &[Post]) -> Result<ChangeSet, UnregisteredPostError> {
    let index: HashMap<&PostId, &Post> = remotes.iter().map(|p| (&p.id, p)).collect();

    let mut set = ChangeSet::default();
    for local in locals {
        let Some(remote) = index.get(&local.id) else {
            return Err(UnregisteredPostError {
                title: local.title.clone(),
                id: local.id.clone(),
            });
        };
        if local != *remote {
            set.insert(remote, local);
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, title: &str, content: &str, tags: &[&str], status: PostStatus) -> Post {
        Post {
            id: PostId::from(id),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status,
        }
    }

    #[test]
    fn scenario_a_single_changed_post() {
        let local = post("1", "A", "x", &["go"], PostStatus::Draft);
        let remote = post("1", "OLD", "y", &["go"], PostStatus::Draft);

        let set = plan(&[local.clone()], &[remote.clone()]).unwrap();
        assert_eq!(set.len(), 1);
        let change = set.get(&PostId::from("1")).unwrap();
        assert_eq!(change.remote, remote);
        assert_eq!(change.local, local);
    }

    #[test]
    fn identical_posts_produce_empty_plan() {
        let p = post("1", "A", "x", &["go"], PostStatus::Published);
        let set = plan(&[p.clone()], &[p]).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn every_field_differing_maps_remote_to_local() {
        let remote = post("7", "r", "r", &["a", "b"], PostStatus::Draft);
        let local = post("7", "l", "l", &["c"], PostStatus::Published);

        let set = plan(&[local.clone()], &[remote.clone()]).unwrap();
        let expected = Change { remote, local };
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![(&PostId::from("7"), &expected)]);
    }

    #[test]
    fn unregistered_local_aborts_without_partial_plan() {
        let remotes = vec![post("1", "old", "x", &[], PostStatus::Draft)];
        let locals = vec![
            post("1", "changed", "x", &[], PostStatus::Draft),
            post("404", "Orphan", "x", &[], PostStatus::Draft),
        ];

        let err = plan(&locals, &remotes).unwrap_err();
        assert_eq!(err.id, PostId::from("404"));
        assert_eq!(err.title, "Orphan");
    }

    #[test]
    fn remote_only_posts_are_ignored() {
        let shared = post("1", "t", "c", &[], PostStatus::Draft);
        let remotes = vec![shared.clone(), post("2", "remote only", "c", &[], PostStatus::Draft)];
        assert!(plan(&[shared], &remotes).unwrap().is_empty());
    }

    #[test]
    fn duplicate_remote_ids_last_wins() {
        let local = post("1", "new", "c", &[], PostStatus::Draft);
        let remotes = vec![
            post("1", "first", "c", &[], PostStatus::Draft),
            post("1", "new", "c", &[], PostStatus::Draft),
        ];
        assert!(plan(&[local], &remotes).unwrap().is_empty());
    }

    #[test]
    fn planning_twice_after_apply_is_idempotent() {
        let locals = vec![
            post("1", "A", "x", &["go"], PostStatus::Draft),
            post("2", "B", "y", &[], PostStatus::Published),
        ];
        let remotes = vec![
            post("1", "OLD", "x", &["go"], PostStatus::Draft),
            post("2", "B", "y", &[], PostStatus::Draft),
        ];
        assert_eq!(plan(&locals, &remotes).unwrap().len(), 2);

        // After a successful sync the remote side equals the local side.
        assert!(plan(&locals, &locals).unwrap().is_empty());
    }

    #[test]
    fn changes_are_ordered_by_id() {
        let remotes = vec![
            post("b", "old", "", &[], PostStatus::Draft),
            post("a", "old", "", &[], PostStatus::Draft),
        ];
        let locals = vec![
            post("b", "new", "", &[], PostStatus::Draft),
            post("a", "new", "", &[], PostStatus::Draft),
        ];
        let set = plan(&locals, &remotes).unwrap();
        let ids: Vec<_> = set.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn snapshots_are_independent() {
        let remote = post("1", "old", "", &["t"], PostStatus::Draft);
        let local = post("1", "new", "", &["t"], PostStatus::Draft);
        let set = plan(&[local], &[remote]).unwrap();

        let mut change = set.get(&PostId::from("1")).unwrap().clone();
        change.local.tags.push("mutated".to_string());
        assert_eq!(change.remote.tags, vec!["t".to_string()]);
        assert_eq!(set.get(&PostId::from("1")).unwrap().local.tags, vec!["t".to_string()]);
    }

    #[test]
    fn field_changes_lists_only_differences() {
        let change = Change {
            remote: post("1", "a", "same", &["x", "y"], PostStatus::Draft),
            local: post("1", "b", "same", &["y", "x"], PostStatus::Published),
        };
        assert_eq!(
            change.field_changes(),
            vec![
                FieldChange::Title {
                    from: "a".to_string(),
                    to: "b".to_string()
                },
                FieldChange::Tags {
                    from: vec!["x".to_string(), "y".to_string()],
                    to: vec!["y".to_string(), "x".to_string()],
                },
                FieldChange::Status {
                    from: PostStatus::Draft,
                    to: PostStatus::Published
                },
            ]
        );
    }
}
