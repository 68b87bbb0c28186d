//! Git object identifier (SHA-1 hash)
//!
//! Object IDs uniquely identify all objects in a repository (blobs, trees,
//! commits). They are stored here as 20 raw bytes; the textual form is the
//! usual 40-character lowercase hex string.
//!
//! Objects live on disk under `.git/objects/<first-2-hex-chars>/<rest>`.

use crate::artifacts::objects::{OBJECT_ID_HEX_LENGTH, OBJECT_ID_RAW_LENGTH};
use std::io;
use std::path::PathBuf;

/// Git object identifier (SHA-1 hash), held as raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_RAW_LENGTH]);

impl ObjectId {
    /// Parse and validate an object ID from its 40-character hex form
    pub fn try_parse(hex: &str) -> anyhow::Result<Self> {
        if hex.len() != OBJECT_ID_HEX_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", hex.len()));
        }
        // byte-range slicing below must not land inside a multibyte char
        if !hex.is_ascii() {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", hex));
        }

        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        for (i, byte) in raw.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
                .map_err(|_| anyhow::anyhow!("Invalid object ID characters: {}", hex))?;
        }

        Ok(Self(raw))
    }

    /// The 40-character hex form
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    /// Write the raw 20-byte form, as used inside tree objects
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        writer.write_all(&self.0)?;
        Ok(())
    }

    /// Read the raw 20-byte form, as used inside tree objects
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        reader.read_exact(&mut raw)?;
        Ok(Self(raw))
    }

    /// Convert to the file system path used for loose object storage
    ///
    /// Splits the hash as `xx/yyyy...` where `xx` is the first two hex chars.
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form (first 7 hex chars, the standard git abbreviation)
    pub fn to_short_oid(&self) -> String {
        self.to_hex().split_at(7).0.to_string()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
