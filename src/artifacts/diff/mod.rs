//! Tree diffing
//!
//! Pathspec-restricted tree-to-tree comparison, used by the touch predicate
//! to decide whether a commit changed anything under a path.

pub mod tree_diff;
