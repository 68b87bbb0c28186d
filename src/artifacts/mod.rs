//! Git data structures and walk algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `core`: shared error kinds
//! - `database`: database entry types
//! - `diff`: pathspec-restricted tree diffing
//! - `log`: commit history traversal (rev walk, pathspec, touch predicate)
//! - `objects`: git object types (blob, tree, commit)

pub mod core;
pub mod database;
pub mod diff;
pub mod log;
pub mod objects;
