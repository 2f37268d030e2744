//! Human-readable change list for `mdlog plan` and `mdlog sync --dry-run`.
//!
//! ```text
//! << Post [123] >>
//! Title: OLD -> New
//! Tags: [go] -> [go, rust]
//! Status: DRAFT -> PUBLISHED
//! Content:
//! --- a/123
//! +++ b/123
//! @@ -1 +1 @@
//! ...
//! ```

use std::fmt::Write as _;

use similar::TextDiff;

use crate::plan::{Change, ChangeSet, FieldChange};

/// Render every change in id order. Empty string for an empty set.
pub fn render_change_list(changes: &ChangeSet) -> String {
    let mut out = String::new();
    for change in changes.changes() {
        out.push_str(&render_change(change));
    }
    out
}

/// Render one change: header, one line per differing scalar field, then a
/// unified diff of the content when it differs.
pub fn render_change(change: &Change) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<< Post [{}] >>", change.local.id);
    for field in change.field_changes() {
        match field {
            FieldChange::Title { from, to } => {
                let _ = writeln!(out, "Title: {from} -> {to}");
            }
            FieldChange::Tags { from, to } => {
                let _ = writeln!(out, "Tags: [{}] -> [{}]", from.join(", "), to.join(", "));
            }
            FieldChange::Status { from, to } => {
                let _ = writeln!(out, "Status: {from} -> {to}");
            }
            FieldChange::Content => {
                out.push_str("Content:\n");
                out.push_str(&content_diff(change));
            }
        }
    }
    out
}

/// Unified diff (3 lines of context) between remote and local HTML.
pub fn content_diff(change: &Change) -> String {
    let old_header = format!("a/{}", change.remote.id);
    let new_header = format!("b/{}", change.local.id);
    let mut unified = TextDiff::from_lines(&change.remote.content, &change.local.content)
        .unified_diff()
        .context_radius(3)
        .header(&old_header, &new_header)
        .to_string();
    if !unified.ends_with('\n') {
        unified.push('\n');
    }
    unified
}
