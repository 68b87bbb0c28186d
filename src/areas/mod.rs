//! Core repository components
//!
//! This module contains the plumbing the walk engine runs against:
//!
//! - `database`: object database for storing blobs, trees, and commits
//! - `refs`: reference management (branches, HEAD)
//! - `repository`: high-level repository handle and coordination

pub mod database;
pub mod refs;
pub mod repository;
