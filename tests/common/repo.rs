//! Fixtures and history builders for the walk tests
//!
//! Histories are built straight through the object database: blobs, trees
//! and commits are stored with fixed timestamps, then HEAD is pointed at the
//! tip. This keeps every test independent of any porcelain commands.

use assert_fs::TempDir;
use revlist::areas::repository::Repository;
use revlist::artifacts::database::database_entry::DatabaseEntry;
use revlist::artifacts::objects::blob::Blob;
use revlist::artifacts::objects::commit::{Author, Commit};
use revlist::artifacts::objects::entry_mode::{EntryMode, FileMode};
use revlist::artifacts::objects::object::Object;
use revlist::artifacts::objects::object_id::ObjectId;
use revlist::artifacts::objects::tree::Tree;
use rstest::fixture;
use std::collections::BTreeMap;

#[fixture]
pub fn empty_repository() -> (TempDir, Repository) {
    super::redirect_temp_dir();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let repository = Repository::init(&dir.path().to_string_lossy(), Box::new(std::io::sink()))
        .expect("Failed to init repository");
    (dir, repository)
}

pub fn author_at(epoch_seconds: i64, offset_minutes: i32) -> Author {
    named_author_at("Test Author", "test@example.com", epoch_seconds, offset_minutes)
}

pub fn named_author_at(
    name: &str,
    email: &str,
    epoch_seconds: i64,
    offset_minutes: i32,
) -> Author {
    let offset = chrono::FixedOffset::east_opt(offset_minutes * 60).expect("valid offset");
    let timestamp = chrono::DateTime::from_timestamp(epoch_seconds, 0)
        .expect("valid timestamp")
        .with_timezone(&offset);
    Author::new_with_timestamp(name.to_string(), email.to_string(), timestamp)
}

pub fn store_blob(repository: &Repository, content: &str) -> ObjectId {
    let blob = Blob::new(content.to_string(), FileMode::Regular);
    repository.database().store(&blob).expect("store blob");
    blob.object_id().expect("blob oid")
}

pub fn blob_entry(oid: ObjectId) -> DatabaseEntry {
    DatabaseEntry::new(oid, FileMode::Regular.into())
}

pub fn tree_entry(oid: ObjectId) -> DatabaseEntry {
    DatabaseEntry::new(oid, EntryMode::Directory)
}

pub fn store_tree(repository: &Repository, entries: BTreeMap<String, DatabaseEntry>) -> ObjectId {
    let tree = Tree::new(entries);
    repository.database().store(&tree).expect("store tree");
    tree.object_id().expect("tree oid")
}

/// Store a single-level tree of file-name/content pairs
pub fn store_flat_tree(repository: &Repository, files: &[(&str, &str)]) -> ObjectId {
    let entries = files
        .iter()
        .map(|(name, content)| (name.to_string(), blob_entry(store_blob(repository, content))))
        .collect();
    store_tree(repository, entries)
}

pub fn store_commit(
    repository: &Repository,
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    message: &str,
) -> ObjectId {
    let commit = Commit::new(parents, tree_oid, author, message.to_string());
    repository.database().store(&commit).expect("store commit");
    commit.object_id().expect("commit oid")
}

pub fn set_head(repository: &Repository, oid: &ObjectId) {
    repository.refs().update_head(oid).expect("update HEAD");
}

/// Linear history of the given length with strictly increasing timestamps;
/// HEAD ends up on the last commit. Returns the commit IDs oldest first.
pub fn build_linear_history(repository: &Repository, length: usize) -> Vec<ObjectId> {
    let mut oids = Vec::new();
    let mut parent: Option<ObjectId> = None;

    for index in 0..length {
        let tree = store_flat_tree(
            repository,
            &[("file.txt", &format!("revision {index}"))],
        );
        let commit = store_commit(
            repository,
            parent.into_iter().collect(),
            tree,
            author_at(1_700_000_000 + index as i64 * 100, 0),
            &format!("commit {index}"),
        );
        parent = Some(commit.clone());
        oids.push(commit);
    }

    set_head(repository, oids.last().expect("non-empty history"));
    oids
}

/// Diamond history with timestamps deliberately fighting the graph shape
/// (the root carries the newest timestamp):
///
/// ```text
///   base <- left  <-+
///   base <- right <-+- merge (HEAD)
/// ```
///
/// Returns `[base, left, right, merge]`.
pub fn build_diamond_history(repository: &Repository) -> Vec<ObjectId> {
    let base_tree = store_flat_tree(repository, &[("file.txt", "base")]);
    let base = store_commit(repository, vec![], base_tree, author_at(4_000, 0), "base");

    let left_tree = store_flat_tree(repository, &[("file.txt", "left")]);
    let left = store_commit(
        repository,
        vec![base.clone()],
        left_tree,
        author_at(3_000, 0),
        "left",
    );

    let right_tree = store_flat_tree(repository, &[("file.txt", "right")]);
    let right = store_commit(
        repository,
        vec![base.clone()],
        right_tree,
        author_at(2_000, 0),
        "right",
    );

    let merge_tree = store_flat_tree(repository, &[("file.txt", "merged")]);
    let merge = store_commit(
        repository,
        vec![left.clone(), right.clone()],
        merge_tree,
        author_at(1_000, 0),
        "merge",
    );

    set_head(repository, &merge);
    vec![base, left, right, merge]
}

/// The three-commit shape used by the path-filter tests:
///
/// - `a`: root, adds `file1`
/// - `b`: child of `a`, adds `file2`
/// - `x`: unrelated root, adds `other`
/// - `merge`: merge of `b` and `x`, tree-same to `b` plus `x`'s file
///   (HEAD; touches nothing new by itself)
///
/// Returns `[a, b, x, merge]`.
pub fn build_merge_history(repository: &Repository) -> Vec<ObjectId> {
    let a_tree = store_flat_tree(repository, &[("file1", "one")]);
    let a = store_commit(repository, vec![], a_tree, author_at(1_000, 0), "add file1");

    let b_tree = store_flat_tree(repository, &[("file1", "one"), ("file2", "two")]);
    let b = store_commit(
        repository,
        vec![a.clone()],
        b_tree,
        author_at(2_000, 0),
        "add file2",
    );

    let x_tree = store_flat_tree(repository, &[("other", "unrelated")]);
    let x = store_commit(
        repository,
        vec![],
        x_tree,
        author_at(1_500, 0),
        "unrelated root",
    );
    repository
        .refs()
        .create_branch("unrelated", &x)
        .expect("create branch");

    let merge_tree = store_flat_tree(
        repository,
        &[("file1", "one"), ("file2", "two"), ("other", "unrelated")],
    );
    let merge = store_commit(
        repository,
        vec![b.clone(), x.clone()],
        merge_tree,
        author_at(3_000, 0),
        "merge unrelated branch",
    );

    set_head(repository, &merge);
    vec![a, b, x, merge]
}
