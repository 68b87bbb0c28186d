//! Walk drivers
//!
//! The high-level entry points over [`RevWalk`]: bounded/unbounded listing,
//! path-filtered listing, and per-commit contribution records. Each driver
//! short-circuits on an empty repository without constructing a cursor, and
//! wraps mid-walk failures in [`HistoryError::Walk`].

use crate::areas::repository::Repository;
use crate::artifacts::core::errors::HistoryError;
use crate::artifacts::log::pathspec::Pathspec;
use crate::artifacts::log::rev_walk::{RevWalk, SortMode};
use crate::artifacts::log::touched::commit_touches;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

/// List the commits reachable from HEAD in the requested order
///
/// A negative `max_n` means unbounded; otherwise at most `max_n` commits are
/// returned, counted from the front of the ordered output.
pub fn list(repository: &Repository, sort: SortMode, max_n: i64) -> anyhow::Result<Vec<Commit>> {
    if repository.is_empty()? {
        return Ok(Vec::new());
    }

    let mut walk = RevWalk::new(repository);
    walk.set_sorting(sort);
    walk.push_head()?;

    let mut commits = Vec::new();
    for oid in walk {
        if max_n >= 0 && commits.len() as i64 >= max_n {
            break;
        }
        let oid = oid.map_err(into_walk_error)?;
        commits.push(resolve_commit(repository, &oid)?);
    }

    Ok(commits)
}

/// List the commits that touch the given path, newest first
///
/// The walk always runs in time order; the pathspec is validated before the
/// repository is consulted at all.
pub fn list_touching(repository: &Repository, path: &str) -> anyhow::Result<Vec<Commit>> {
    let pathspec = Pathspec::compile(&[path])?;

    if repository.is_empty()? {
        return Ok(Vec::new());
    }

    let mut walk = RevWalk::new(repository);
    walk.set_sorting(SortMode::TIME);
    walk.push_head()?;

    let mut commits = Vec::new();
    for oid in walk {
        let oid = oid.map_err(into_walk_error)?;
        let commit = resolve_commit(repository, &oid)?;
        if commit_touches(repository, &commit, &pathspec).map_err(into_walk_error)? {
            commits.push(commit);
        }
    }

    Ok(commits)
}

/// One record per commit reachable from HEAD, as parallel columns
///
/// `when` folds the author's UTC offset into the epoch timestamp, so equal
/// instants written from different timezones produce different values; the
/// columns are index-aligned and always the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contributions {
    pub when: Vec<f64>,
    pub author: Vec<String>,
    pub email: Vec<String>,
}

impl Contributions {
    pub fn len(&self) -> usize {
        self.when.len()
    }

    pub fn is_empty(&self) -> bool {
        self.when.is_empty()
    }
}

/// Collect author name, email and timestamp for every commit reachable from
/// HEAD, in the requested order
pub fn contributions(repository: &Repository, sort: SortMode) -> anyhow::Result<Contributions> {
    let mut result = Contributions::default();

    if repository.is_empty()? {
        return Ok(result);
    }

    let mut walk = RevWalk::new(repository);
    walk.set_sorting(sort);
    walk.push_head()?;

    for oid in walk {
        let oid = oid.map_err(into_walk_error)?;
        let commit = resolve_commit(repository, &oid)?;
        let author = commit.author();

        result.when.push(author.when());
        result.author.push(author.name().to_string());
        result.email.push(author.email().to_string());
    }

    Ok(result)
}

fn resolve_commit(repository: &Repository, oid: &ObjectId) -> anyhow::Result<Commit> {
    repository
        .database()
        .parse_object_as_commit(oid)
        .and_then(|commit| commit.with_context(|| format!("object {} is not a commit", oid)))
        .map_err(into_walk_error)
}

/// Wrap a mid-walk failure, keeping already-named error kinds intact
fn into_walk_error(source: anyhow::Error) -> anyhow::Error {
    if source.is::<HistoryError>() {
        source
    } else {
        HistoryError::Walk(source).into()
    }
}
