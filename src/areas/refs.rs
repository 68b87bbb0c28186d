//! Git references (branches, HEAD)
//!
//! References are human-readable names pointing to commits. They can be:
//! - Direct: a file containing a 40-character SHA-1 hash
//! - Symbolic: a file containing `ref: <path>` pointing to another reference
//!
//! HEAD is the special reference naming the current branch (or commit, when
//! detached).

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Git references manager
///
/// Handles reading and writing reference files under `.git`, with exclusive
/// file locking on updates.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

/// Content of a reference file: either a symbolic target or a direct OID
#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_from(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string())))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(content)?)))
        }
    }
}

impl Refs {
    /// Read the commit ID that HEAD ultimately points to
    ///
    /// Follows symbolic references recursively. Returns `None` when the
    /// repository has no commits yet.
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path())
    }

    /// Point HEAD (following any symref chain) at a new commit
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let target = self.resolve_ref_path(self.head_path())?;
        self.update_ref_file(target, oid.to_hex())
    }

    /// Create a branch ref pointing at the given commit
    pub fn create_branch(&self, name: &str, source_oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(name).into_boxed_path();
        self.update_ref_file(branch_path, source_oid.to_hex())
    }

    /// Write a reference file, creating parent directories as needed
    ///
    /// Acquires an exclusive lock on the reference file during the update.
    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    /// Follow a symref chain to the file that holds (or will hold) the OID
    fn resolve_ref_path(&self, path: Box<Path>) -> anyhow::Result<Box<Path>> {
        match SymRefOrOid::read_from(&path)? {
            Some(SymRefOrOid::SymRef(target)) => {
                self.resolve_ref_path(self.path.join(target).into_boxed_path())
            }
            Some(SymRefOrOid::Oid(_)) | None => Ok(path),
        }
    }

    fn read_symref(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        match SymRefOrOid::read_from(path)? {
            Some(SymRefOrOid::SymRef(target)) => self.read_symref(&self.path.join(target)),
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
