//! Core data types for modpub.
//!
//! This crate defines what a publishing pass works from: the `publish.json`
//! manifest, build properties, the resolved publication target, and the
//! workspace of subprojects that manifest entries are bound to.
//!
//! This crate is intentionally free of network I/O.

pub mod manifest;
pub mod properties;
pub mod settings;
pub mod workspace;
