//! Error kinds surfaced by the walk operations
//!
//! All fallible functions in this crate return `anyhow::Result`; the variants
//! below are attached as the root of the error chain so that callers can
//! distinguish argument, repository, reference and traversal failures by
//! downcasting.
//!
//! Exhaustion of a walk is not an error: the cursor signals it by returning
//! `None` from its iterator.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The caller supplied a malformed argument. Raised before any
    /// repository or cursor resource is allocated.
    #[error("invalid argument '{parameter}': {reason}")]
    Argument {
        parameter: &'static str,
        reason: String,
    },

    /// The repository handle cannot be opened or is not a git repository.
    #[error("invalid repository at {}: {reason}", path.display())]
    Repository { path: PathBuf, reason: String },

    /// A reference (typically HEAD) cannot be resolved to a commit.
    #[error("reference '{name}' cannot be resolved: {reason}")]
    Reference { name: String, reason: String },

    /// A traversal or object-resolution failure mid-walk. The whole walk
    /// call aborts; no partial results are returned.
    #[error("revision walk failed: {0}")]
    Walk(anyhow::Error),
}
