//! Commit history traversal
//!
//! This module implements the revision walk engine:
//!
//! - `rev_walk`: the graph cursor over the commit DAG, with configurable
//!   ordering (topological, time, reversed)
//! - `pathspec`: compiled path matcher backed by a trie
//! - `touched`: the "does this commit touch this path" predicate
//! - `rev_list`: the walk drivers (`list`, `list_touching`, `contributions`)

pub mod pathspec;
pub mod rev_list;
pub mod rev_walk;
pub mod touched;
