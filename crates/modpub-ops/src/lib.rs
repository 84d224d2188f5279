//! High-level operations behind the `modpub` commands.
//!
//! Every operation starts from an [`ops_context::PublishContext`]: the build
//! root, its properties, the resolved publication target, the workspace, and
//! the loaded manifest.

pub mod ops_context;
pub mod ops_plan;
pub mod ops_settings;
pub mod ops_stage;
