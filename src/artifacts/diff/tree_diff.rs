use crate::areas::database::Database;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::log::pathspec::Pathspec;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The kind of change a path underwent between two trees
#[derive(Debug, Clone, PartialEq)]
pub enum TreeChangeType {
    Added(DatabaseEntry),
    Deleted(DatabaseEntry),
    Modified {
        old: DatabaseEntry,
        new: DatabaseEntry,
    },
}

impl TreeChangeType {
    fn from_entries(old: Option<DatabaseEntry>, new: Option<DatabaseEntry>) -> Option<Self> {
        match (old, new) {
            (Some(old), Some(new)) => Some(TreeChangeType::Modified { old, new }),
            (Some(old), None) => Some(TreeChangeType::Deleted(old)),
            (None, Some(new)) => Some(TreeChangeType::Added(new)),
            (None, None) => None,
        }
    }
}

pub type ChangeSet = BTreeMap<PathBuf, TreeChangeType>;

type TreeEntryMap = BTreeMap<String, DatabaseEntry>;

/// Recursive tree-to-tree comparison, restricted by a pathspec
///
/// Walks both trees in lockstep, descending into subtrees only where the
/// pathspec can still match, and records one delta per changed blob path.
pub struct TreeDiff<'r> {
    database: &'r Database,
    change_set: ChangeSet,
}

impl<'r> TreeDiff<'r> {
    pub fn new(database: &'r Database) -> Self {
        TreeDiff {
            database,
            change_set: ChangeSet::new(),
        }
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.change_set
    }

    /// Number of changed blob paths recorded so far
    pub fn num_deltas(&self) -> usize {
        self.change_set.len()
    }

    /// Compare the trees behind two object IDs
    ///
    /// Either side may be `None`, which stands for the empty tree. Commit
    /// IDs are accepted and resolved to their trees.
    pub fn compare_oids(
        &mut self,
        old_oid: Option<&ObjectId>,
        new_oid: Option<&ObjectId>,
        pathspec: &Pathspec,
        prefix: &Path,
    ) -> anyhow::Result<()> {
        if old_oid == new_oid {
            return Ok(());
        }

        let old_entries = self.inflate_oid_to_tree_entries(old_oid)?;
        let new_entries = self.inflate_oid_to_tree_entries(new_oid)?;

        self.detect_deletions(&old_entries, &new_entries, pathspec, prefix)?;
        self.detect_additions(&old_entries, &new_entries, pathspec, prefix)?;

        Ok(())
    }

    /// Entries present in `old` that changed or disappeared in `new`
    fn detect_deletions(
        &mut self,
        old_entries: &TreeEntryMap,
        new_entries: &TreeEntryMap,
        pathspec: &Pathspec,
        prefix: &Path,
    ) -> anyhow::Result<()> {
        for (name, entry) in old_entries {
            if !pathspec.allows_entry(name) {
                continue;
            }

            let other = new_entries.get(name);
            if other == Some(entry) {
                continue;
            }

            let path = prefix.join(name);
            let sub_pathspec = pathspec.descend(name);

            let old_tree_oid = entry.is_tree().then_some(&entry.oid);
            let new_tree_oid = other.filter(|other| other.is_tree()).map(|other| &other.oid);
            self.compare_oids(old_tree_oid, new_tree_oid, &sub_pathspec, &path)?;

            // a blob-level delta only counts once the pattern is fully
            // consumed at this entry
            if !sub_pathspec.is_matching() {
                continue;
            }

            let old_blob = (!entry.is_tree()).then(|| entry.clone());
            let new_blob = other.filter(|other| !other.is_tree()).cloned();
            if let Some(change_type) = TreeChangeType::from_entries(old_blob, new_blob) {
                self.change_set.insert(path, change_type);
            }
        }

        Ok(())
    }

    /// Entries that only exist in `new`
    fn detect_additions(
        &mut self,
        old_entries: &TreeEntryMap,
        new_entries: &TreeEntryMap,
        pathspec: &Pathspec,
        prefix: &Path,
    ) -> anyhow::Result<()> {
        for (name, entry) in new_entries {
            if !pathspec.allows_entry(name) {
                continue;
            }
            if old_entries.contains_key(name) {
                continue;
            }

            let path = prefix.join(name);
            let sub_pathspec = pathspec.descend(name);

            if entry.is_tree() {
                self.compare_oids(None, Some(&entry.oid), &sub_pathspec, &path)?;
            } else if sub_pathspec.is_matching() {
                self.change_set
                    .insert(path, TreeChangeType::Added(entry.clone()));
            }
        }

        Ok(())
    }

    /// Resolve an object ID to its tree entries, following a commit to its
    /// tree when needed; `None` inflates to the empty tree
    fn inflate_oid_to_tree_entries(
        &self,
        oid: Option<&ObjectId>,
    ) -> anyhow::Result<TreeEntryMap> {
        let Some(oid) = oid else {
            return Ok(TreeEntryMap::new());
        };

        match self.database.parse_object(oid)? {
            ObjectBox::Tree(tree) => Ok(tree.into_entries().collect()),
            ObjectBox::Commit(commit) => {
                let tree = self
                    .database
                    .parse_object_as_tree(commit.tree_oid())?
                    .with_context(|| {
                        format!("commit {} references a non-tree object", oid)
                    })?;
                Ok(tree.into_entries().collect())
            }
            ObjectBox::Blob(_) => {
                anyhow::bail!("object {} is a blob, expected a tree or commit", oid)
            }
        }
    }
}
