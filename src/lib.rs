//! revlist - a revision-walk engine over git object databases
//!
//! The crate is organized in two layers:
//!
//! - `areas`: repository plumbing (loose object database, refs, repository
//!   facade)
//! - `artifacts`: the object model and the walk algorithms (rev walk cursor,
//!   pathspec matching, touch predicate, walk drivers)
//!
//! The main entry points are the walk drivers in [`artifacts::log::rev_list`]:
//! [`list`], [`list_touching`] and [`contributions`].

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use artifacts::core::errors::HistoryError;
pub use artifacts::log::rev_list::{Contributions, contributions, list, list_touching};
pub use artifacts::log::rev_walk::{RevWalk, SortMode};
