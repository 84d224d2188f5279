use serde::Deserialize;
use std::path::Path;

use modpub_util::errors::ModpubError;

/// File name of the publish manifest at the build root.
pub const MANIFEST_FILE: &str = "publish.json";

/// One publishable module from the `modules` array of `publish.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Subproject path, e.g. `:api`.
    pub name: String,
    pub artifact_id: String,
    /// Passed through verbatim; no version policy is applied.
    pub version: String,
}

/// The parsed `publish.json`: module descriptors in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    modules: Vec<ModuleDescriptor>,
}

#[derive(Deserialize)]
struct RawManifest {
    modules: Vec<serde_json::Value>,
}

impl ManifestDocument {
    /// Load and parse a publish manifest from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModpubError::MalformedManifest {
            index: None,
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let manifest = Self::from_str(&content)?;
        tracing::debug!(
            "Loaded {} module(s) from {}",
            manifest.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parse a publish manifest from a JSON string.
    ///
    /// Unknown keys are ignored at both levels. Any record lacking one of
    /// the required fields fails the whole parse.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> miette::Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| ModpubError::MalformedManifest {
                index: None,
                message: format!("Failed to parse {MANIFEST_FILE}: {e}"),
            })?;

        let modules = raw
            .modules
            .iter()
            .enumerate()
            .map(|(index, record)| parse_record(index, record))
            .collect::<Result<Vec<_>, ModpubError>>()?;

        Ok(Self { modules })
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a ManifestDocument {
    type Item = &'a ModuleDescriptor;
    type IntoIter = std::slice::Iter<'a, ModuleDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

fn parse_record(index: usize, record: &serde_json::Value) -> Result<ModuleDescriptor, ModpubError> {
    let Some(fields) = record.as_object() else {
        return Err(ModpubError::MalformedManifest {
            index: Some(index),
            message: "expected an object".to_string(),
        });
    };

    let required = |key: &str| -> Result<String, ModpubError> {
        match fields.get(key) {
            None | Some(serde_json::Value::Null) => Err(ModpubError::MalformedManifest {
                index: Some(index),
                message: format!("missing field `{key}`"),
            }),
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
                Err(ModpubError::MalformedManifest {
                    index: Some(index),
                    message: format!("field `{key}` is empty"),
                })
            }
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ModpubError::MalformedManifest {
                index: Some(index),
                message: format!("field `{key}` must be a string"),
            }),
        }
    };

    Ok(ModuleDescriptor {
        name: required("name")?,
        artifact_id: required("artifactId")?,
        version: required("version")?,
    })
}
