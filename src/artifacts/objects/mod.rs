//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes. The walk
//! engine cares about three of them:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: directory listing (names, modes, and object IDs)
//! - **Commit**: snapshot with metadata (author, message, parents, tree)
//!
//! All objects implement serialization/deserialization for the git object
//! format: `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal form
pub const OBJECT_ID_HEX_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_RAW_LENGTH: usize = 20;
