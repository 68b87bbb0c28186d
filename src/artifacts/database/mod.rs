//! Database entry types
//!
//! Types used when reading objects from the database. A database entry is a
//! reference to an object together with its mode information.

pub mod database_entry;
