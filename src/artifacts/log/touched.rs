//! The touch predicate
//!
//! Decides whether a commit changed anything under a pathspec, following
//! git's simplified history rules:
//!
//! - a root commit touches the path when its tree contains a match
//! - a single-parent commit touches the path when the diff against its
//!   parent has at least one delta under the pathspec
//! - a merge commit is reported only when it differs from every parent
//!   under the pathspec; being tree-same to any one parent means the change
//!   arrived through that parent and the merge is skipped

use crate::areas::repository::Repository;
use crate::artifacts::log::pathspec::Pathspec;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Whether the commit changed anything under the pathspec
pub fn commit_touches(
    repository: &Repository,
    commit: &Commit,
    pathspec: &Pathspec,
) -> anyhow::Result<bool> {
    match commit.parents() {
        [] => pathspec.matches_tree(repository.database(), commit.tree_oid()),
        [parent] => differs_from_parent(repository, commit, parent, pathspec),
        parents => {
            // a merge tree-same to any parent inherited the change from
            // that side and is skipped
            let mut unmatched = parents.len();
            for parent in parents {
                if differs_from_parent(repository, commit, parent, pathspec)? {
                    unmatched -= 1;
                }
            }
            Ok(unmatched == 0)
        }
    }
}

/// Whether the diff between a parent tree and the commit tree has at least
/// one delta under the pathspec
fn differs_from_parent(
    repository: &Repository,
    commit: &Commit,
    parent_oid: &ObjectId,
    pathspec: &Pathspec,
) -> anyhow::Result<bool> {
    let diff = repository
        .database()
        .tree_diff(Some(parent_oid), Some(commit.tree_oid()), pathspec)?;

    Ok(diff.num_deltas() > 0)
}
