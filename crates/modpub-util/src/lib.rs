//! Shared utilities for modpub.
//!
//! This crate provides cross-cutting concerns used by all other modpub crates:
//! error types, filesystem helpers, and the checksum digests written next to
//! staged publication files.

pub mod errors;
pub mod fs;
pub mod hash;
