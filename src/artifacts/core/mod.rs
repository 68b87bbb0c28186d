//! Shared utilities used across the artifact modules

pub mod errors;
