//! Operation: locate the build root and load everything a publishing pass needs.

use std::path::{Path, PathBuf};

use modpub_core::manifest::{ManifestDocument, MANIFEST_FILE};
use modpub_core::properties::BuildProperties;
use modpub_core::settings::PublicationTarget;
use modpub_core::workspace::Workspace;
use modpub_util::errors::ModpubError;
use modpub_util::fs::find_ancestor_with;

/// Where to look and which command-line properties to apply.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Explicit build root. Defaults to the manifest's directory, then to the
    /// nearest ancestor of the working directory holding `publish.json`.
    pub root: Option<PathBuf>,
    /// Explicit manifest path. Defaults to `<root>/publish.json`.
    pub manifest: Option<PathBuf>,
    /// `-P` overrides, in command-line order.
    pub properties: Vec<(String, String)>,
}

/// Everything loaded for one publishing pass.
#[derive(Debug, Clone)]
pub struct PublishContext {
    pub root_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub properties: BuildProperties,
    pub target: PublicationTarget,
    pub workspace: Workspace,
    pub manifest: ManifestDocument,
}

impl PublishContext {
    /// Load against the process environment.
    pub fn load(cwd: &Path, options: &ContextOptions) -> miette::Result<Self> {
        Self::load_with_env(cwd, options, |key| std::env::var(key).ok())
    }

    /// Load with an explicit environment lookup.
    pub fn load_with_env<F>(cwd: &Path, options: &ContextOptions, env: F) -> miette::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root_dir = locate_root(cwd, options)?;
        tracing::debug!("Build root {}", root_dir.display());
        let manifest_path = options
            .manifest
            .as_ref()
            .map(|m| cwd.join(m))
            .unwrap_or_else(|| root_dir.join(MANIFEST_FILE));

        let properties = load_properties(&root_dir, options)?;
        let target = PublicationTarget::resolve(&properties, env)?;
        let workspace = Workspace::load(&root_dir)?;
        let manifest = ManifestDocument::from_path(&manifest_path)?;

        Ok(Self {
            root_dir,
            manifest_path,
            properties,
            target,
            workspace,
            manifest,
        })
    }
}

/// Build properties from `gradle.properties` plus the `-P` overrides.
pub fn load_properties(root_dir: &Path, options: &ContextOptions) -> miette::Result<BuildProperties> {
    Ok(BuildProperties::load(root_dir)?.with_overrides(options.properties.iter().cloned()))
}

/// Resolve the build root for `options`, starting from `cwd`.
pub fn locate_root(cwd: &Path, options: &ContextOptions) -> miette::Result<PathBuf> {
    if let Some(root) = &options.root {
        return Ok(cwd.join(root));
    }
    if let Some(manifest) = &options.manifest {
        let manifest = cwd.join(manifest);
        if let Some(parent) = manifest.parent() {
            return Ok(parent.to_path_buf());
        }
    }
    find_ancestor_with(cwd, MANIFEST_FILE).ok_or_else(|| {
        ModpubError::Generic {
            message: format!("Could not find {MANIFEST_FILE} in this directory or any parent"),
        }
        .into()
    })
}
