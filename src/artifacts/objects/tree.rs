//! Git tree object
//!
//! Trees represent directory snapshots. They contain entries for files
//! (blobs) and subdirectories (other trees), along with their names and
//! modes.
//!
//! On disk: `tree <size>\0<entries>`, each entry being
//! `<mode> <name>\0<20-byte-sha1>`.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Git tree object representing a single directory level
///
/// Nested directories appear as entries with `EntryMode::Directory` whose
/// object ID points at another tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    pub fn new(entries: BTreeMap<String, DatabaseEntry>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, DatabaseEntry)> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        for (name, entry) in &self.entries {
            let header = format!("{} {}", entry.mode.as_str(), name);
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.push(0);
            entry.oid.write_raw_to(&mut content_bytes)?;
        }

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.last() != Some(&b' ') {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }
            mode_bytes.pop(); // drop the space

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::try_from(mode_str)?;

            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || name_bytes.last() != Some(&b'\0') {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            name_bytes.pop(); // drop NUL
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_raw_from(&mut reader).context("unexpected EOF in object id")?;

            entries.insert(name, DatabaseEntry::new(oid, mode));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| {
                let object_type = if entry.is_tree() {
                    ObjectType::Tree
                } else {
                    ObjectType::Blob
                };

                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    object_type.as_str(),
                    entry.oid,
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::entry_mode::FileMode;
    use std::io::Cursor;

    fn sample_oid(fill: char) -> ObjectId {
        ObjectId::try_parse(&fill.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn serialize_then_deserialize_preserves_entries() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "file.txt".to_string(),
            DatabaseEntry::new(sample_oid('a'), FileMode::Regular.into()),
        );
        entries.insert(
            "sub".to_string(),
            DatabaseEntry::new(sample_oid('b'), EntryMode::Directory),
        );
        let tree = Tree::new(entries);

        let bytes = tree.serialize().unwrap();
        let mut reader = Cursor::new(bytes);
        let object_type = ObjectType::parse_object_type(&mut reader).unwrap();
        assert_eq!(object_type, ObjectType::Tree);

        let read_back = Tree::deserialize(reader).unwrap();
        assert_eq!(read_back, tree);
    }

    #[test]
    fn empty_tree_deserializes_to_no_entries() {
        let tree = Tree::default();
        let bytes = tree.serialize().unwrap();

        let mut reader = Cursor::new(bytes);
        ObjectType::parse_object_type(&mut reader).unwrap();
        let read_back = Tree::deserialize(reader).unwrap();
        assert!(read_back.is_empty());
    }

    #[test]
    fn truncated_entry_is_an_error() {
        let mut bytes = b"100644 file.txt\0".to_vec();
        bytes.extend_from_slice(&[0xab; 10]); // only half an oid

        assert!(Tree::deserialize(Cursor::new(bytes)).is_err());
    }
}
