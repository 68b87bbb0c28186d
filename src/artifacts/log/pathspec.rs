//! Compiled path matchers
//!
//! A [`Pathspec`] is compiled from one or more slash-separated patterns into
//! a trie keyed by path components. A pattern matches the path it names and
//! everything below it, so `src` matches `src/main.rs`. The patterns `/` and
//! `.` compile to a matcher that accepts every path.

use crate::areas::database::Database;
use crate::artifacts::core::errors::HistoryError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Pathspec {
    trie: Trie<String>,
    root_path: PathBuf,
}

impl Pathspec {
    /// Compile a pathspec from pattern strings
    ///
    /// Fails with an [`HistoryError::Argument`] naming `path` when a pattern
    /// is empty or contains a NUL byte; this runs before any repository
    /// resource is allocated.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> anyhow::Result<Self> {
        let mut trie = Trie::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                return Err(HistoryError::Argument {
                    parameter: "path",
                    reason: "pattern must not be empty".to_string(),
                }
                .into());
            }
            if pattern.contains('\0') {
                return Err(HistoryError::Argument {
                    parameter: "path",
                    reason: "pattern must not contain NUL bytes".to_string(),
                }
                .into());
            }

            let trimmed = pattern.trim_matches('/');
            if trimmed.is_empty() || trimmed == "." {
                // "/" and "." match every path
                trie.is_matching = true;
                continue;
            }

            let components: Vec<String> =
                trimmed.split('/').map(|part| part.to_string()).collect();
            trie.insert(&components);
        }

        Ok(Self {
            trie,
            root_path: PathBuf::new(),
        })
    }

    /// The tree path this (possibly descended) pathspec is anchored at
    pub fn path(&self) -> &Path {
        &self.root_path
    }

    /// Whether the pattern is fully consumed at this point: everything at or
    /// below the current position matches
    pub fn is_matching(&self) -> bool {
        self.trie.is_matching
    }

    /// Whether a tree entry with this name can contain a match
    pub fn allows_entry(&self, name: &str) -> bool {
        self.trie.contains_single(name)
    }

    /// Narrow the pathspec to the subtree behind the named entry
    pub fn descend(&self, name: &str) -> Self {
        Self {
            trie: if self.trie.is_matching {
                self.trie.clone()
            } else {
                self.trie
                    .children
                    .get(name)
                    .cloned()
                    .unwrap_or_else(Trie::new)
            },
            root_path: self.root_path.join(name),
        }
    }

    /// Test whether any entry of the given tree matches the pathspec
    ///
    /// Used for root commits, which have no parent to diff against.
    pub fn matches_tree(&self, database: &Database, tree_oid: &ObjectId) -> anyhow::Result<bool> {
        let tree = database
            .parse_object_as_tree(tree_oid)?
            .with_context(|| format!("object {} is not a tree", tree_oid))?;

        self.matches_tree_entries(database, &tree)
    }

    fn matches_tree_entries(&self, database: &Database, tree: &Tree) -> anyhow::Result<bool> {
        for (name, entry) in tree.entries() {
            if self.trie.is_matching {
                return Ok(true);
            }

            let sub = self.descend(name);
            if sub.is_matching() {
                return Ok(true);
            }
            if entry.is_tree() && !sub.trie.is_empty() && sub.matches_tree(database, &entry.oid)? {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie<T: Hash + Eq + Clone> {
    is_matching: bool,
    children: HashMap<T, Trie<T>>,
}

impl<T: Hash + Eq + Clone> Trie<T> {
    pub fn new() -> Self {
        Trie {
            is_matching: false,
            children: HashMap::new(),
        }
    }

    pub fn insert(&mut self, path: &[T]) {
        let mut node = self;
        for part in path {
            node = node.children.entry(part.clone()).or_insert_with(Trie::new);
        }
        node.is_matching = true;
    }

    pub fn contains(&self, path: &[T]) -> bool {
        let mut node = self;
        for part in path {
            match node.children.get(part) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_matching
    }

    pub fn contains_single<Q>(&self, part: &Q) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.is_matching {
            return true;
        }

        self.children.contains_key(part)
    }

    pub fn is_empty(&self) -> bool {
        !self.is_matching && self.children.is_empty()
    }
}

impl<T: Hash + Eq + Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    // ========== Trie Tests ==========

    #[test]
    fn trie_insert_and_contains_single_path() {
        let mut trie = Trie::new();
        let path = vec!["src", "main", "rs"];
        trie.insert(&path);

        assert!(trie.contains(&path));
    }

    #[test]
    fn trie_does_not_contain_nonexistent_path() {
        let mut trie = Trie::new();
        trie.insert(&["src", "main", "rs"]);

        assert!(!trie.contains(&["src", "lib", "rs"]));
        assert!(!trie.contains(&["docs", "README", "md"]));
    }

    #[test]
    fn trie_does_not_match_partial_path() {
        let mut trie = Trie::new();
        trie.insert(&["src", "main", "rs"]);

        // Partial paths should not match
        assert!(!trie.contains(&["src"]));
        assert!(!trie.contains(&["src", "main"]));
    }

    #[test]
    fn trie_handles_shared_prefixes() {
        let mut trie = Trie::new();
        trie.insert(&["src", "utils", "helper", "rs"]);
        trie.insert(&["src", "utils", "config", "rs"]);
        trie.insert(&["src", "main", "rs"]);

        assert!(trie.contains(&["src", "utils", "helper", "rs"]));
        assert!(trie.contains(&["src", "utils", "config", "rs"]));
        assert!(trie.contains(&["src", "main", "rs"]));

        // Shared prefix is not a complete path
        assert!(!trie.contains(&["src", "utils"]));
    }

    #[test]
    fn trie_contains_single_checks_children() {
        let mut trie = Trie::new();
        trie.insert(&["src", "main"]);

        assert!(trie.contains_single("src"));
        assert!(!trie.contains_single("docs"));
    }

    proptest! {
        #[test]
        fn trie_contains_every_inserted_path(
            paths in proptest::collection::vec(
                proptest::collection::vec("[a-z]{1,8}", 1..4),
                1..8,
            )
        ) {
            let mut trie = Trie::new();
            for path in &paths {
                trie.insert(path);
            }
            for path in &paths {
                assert!(trie.contains(path));
            }
        }
    }

    // ========== Pathspec Tests ==========

    #[test]
    fn pathspec_rejects_empty_pattern() {
        let error = Pathspec::compile(&[""]).unwrap_err();
        let history_error = error.downcast_ref::<HistoryError>();

        assert!(matches!(
            history_error,
            Some(HistoryError::Argument { parameter: "path", .. })
        ));
    }

    #[test]
    fn pathspec_rejects_nul_bytes() {
        assert!(Pathspec::compile(&["src\0main"]).is_err());
    }

    #[test]
    fn pathspec_root_matches_everything() {
        let pathspec = Pathspec::compile(&["/"]).unwrap();

        assert!(pathspec.is_matching());
        assert!(pathspec.allows_entry("anything"));
        assert!(pathspec.descend("deeply").descend("nested").is_matching());
    }

    #[test]
    fn pathspec_allows_entry_on_first_component() {
        let pathspec = Pathspec::compile(&["src/main.rs"]).unwrap();

        assert!(pathspec.allows_entry("src"));
        assert!(!pathspec.allows_entry("docs"));
    }

    #[test]
    fn pathspec_descend_narrows_the_pattern() {
        let pathspec = Pathspec::compile(&["src/main.rs"]).unwrap();

        let src = pathspec.descend("src");
        assert_eq!(src.path(), Path::new("src"));
        assert!(!src.is_matching());
        assert!(src.descend("main.rs").is_matching());
        assert!(!src.descend("lib.rs").is_matching());
    }

    #[test]
    fn pathspec_directory_pattern_matches_below() {
        let pathspec = Pathspec::compile(&["src"]).unwrap();

        // Once the pattern is consumed, everything below matches
        let below = pathspec.descend("src").descend("nested");
        assert!(below.is_matching());
        assert!(below.allows_entry("anything"));
    }

    #[test]
    fn pathspec_strips_leading_and_trailing_slashes() {
        let pathspec = Pathspec::compile(&["/src/main.rs/"]).unwrap();

        assert!(pathspec.allows_entry("src"));
        assert!(pathspec.descend("src").descend("main.rs").is_matching());
    }
}
