//! Operation: resolve the publication target without loading the manifest.

use std::path::Path;

use modpub_core::settings::PublicationTarget;

use crate::ops_context::{load_properties, locate_root, ContextOptions};

/// Resolve repository URL and token for the build containing `cwd`.
pub fn resolve_target<F>(
    cwd: &Path,
    options: &ContextOptions,
    env: F,
) -> miette::Result<PublicationTarget>
where
    F: Fn(&str) -> Option<String>,
{
    let root_dir = locate_root(cwd, options)?;
    let properties = load_properties(&root_dir, options)?;
    PublicationTarget::resolve(&properties, env)
}
