use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use modpub_util::errors::ModpubError;

use crate::manifest::{ManifestDocument, ModuleDescriptor};

/// Settings scripts declaring the build's subprojects, in lookup order.
pub const SETTINGS_FILES: [&str; 2] = ["settings.gradle.kts", "settings.gradle"];

/// A subproject of the build, addressed by its `:`-separated path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubprojectHandle {
    path: String,
    dir: PathBuf,
}

impl SubprojectHandle {
    /// Project path, e.g. `:api` or `:libs:json`. The root project is `:`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Project directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path to the build output directory.
    pub fn build_dir(&self) -> PathBuf {
        self.dir.join("build")
    }
}

/// A manifest entry paired with the subproject it publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundModule {
    pub descriptor: ModuleDescriptor,
    pub subproject: SubprojectHandle,
}

/// A multi-project build: the root directory plus every included subproject.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root_dir: PathBuf,
    subprojects: BTreeMap<String, SubprojectHandle>,
}

impl Workspace {
    /// A workspace containing only the root project.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let mut subprojects = BTreeMap::new();
        subprojects.insert(
            ":".to_string(),
            SubprojectHandle {
                path: ":".to_string(),
                dir: root_dir.clone(),
            },
        );
        Self {
            root_dir,
            subprojects,
        }
    }

    /// Load the workspace from the settings script in `root_dir`.
    ///
    /// Without a settings script the workspace contains only the root project.
    pub fn load(root_dir: &Path) -> miette::Result<Self> {
        let mut workspace = Self::new(root_dir);
        let Some(settings) = SETTINGS_FILES
            .iter()
            .map(|name| root_dir.join(name))
            .find(|path| path.is_file())
        else {
            tracing::debug!("No settings script in {}", root_dir.display());
            return Ok(workspace);
        };

        let content = std::fs::read_to_string(&settings).map_err(|e| ModpubError::Settings {
            message: format!("Failed to read {}: {e}", settings.display()),
        })?;
        for path in parse_includes(&content) {
            workspace.include(&path);
        }
        tracing::debug!(
            "Found {} subproject(s) in {}",
            workspace.subprojects.len() - 1,
            settings.display()
        );
        Ok(workspace)
    }

    /// Add a subproject. `api`, `:api` and `api/` all name the same project;
    /// a path `:a:b` lives in directory `a/b`. Ancestors are added too, so
    /// including `:libs:json` also makes `:libs` a project.
    pub fn include(&mut self, path: &str) {
        let path = normalize_path(path);
        let mut current = String::new();
        let mut dir = self.root_dir.clone();
        for segment in path.split(':').filter(|segment| !segment.is_empty()) {
            current.push(':');
            current.push_str(segment);
            dir.push(segment);
            self.subprojects
                .entry(current.clone())
                .or_insert_with(|| SubprojectHandle {
                    path: current.clone(),
                    dir: dir.clone(),
                });
        }
    }

    /// Look up a subproject by path.
    pub fn subproject(&self, path: &str) -> Option<&SubprojectHandle> {
        self.subprojects.get(&normalize_path(path))
    }

    /// Map every manifest entry to its subproject.
    ///
    /// All entries are checked before anything is returned, so a bad entry
    /// anywhere in the manifest means no module is bound at all. Two entries
    /// naming the same subproject are rejected because each subproject
    /// carries a single publication.
    pub fn bind(&self, manifest: &ManifestDocument) -> miette::Result<Vec<BoundModule>> {
        let mut seen = BTreeSet::new();
        let mut bound = Vec::with_capacity(manifest.len());
        for (index, descriptor) in manifest.iter().enumerate() {
            let subproject =
                self.subproject(&descriptor.name)
                    .ok_or_else(|| ModpubError::UnresolvedSubproject {
                        name: descriptor.name.clone(),
                    })?;
            if !seen.insert(subproject.path()) {
                return Err(ModpubError::MalformedManifest {
                    index: Some(index),
                    message: format!("subproject `{}` is listed more than once", subproject.path()),
                }
                .into());
            }
            bound.push(BoundModule {
                descriptor: descriptor.clone(),
                subproject: subproject.clone(),
            });
        }
        Ok(bound)
    }
}

/// Canonical `:`-prefixed project path. `/` separators are accepted as `:`.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim()
        .split([':', '/'])
        .filter(|segment| !segment.is_empty())
        .collect();
    format!(":{}", segments.join(":"))
}

/// Extract project paths from `include` statements in a settings script.
///
/// Handles both `include(":a", ":b")` (Kotlin DSL, possibly spanning lines)
/// and `include ':a', ':b'` (Groovy DSL). `includeBuild` is not a project
/// include and is skipped.
pub fn parse_includes(content: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut open_call = false;
    for line in content.lines() {
        let code = strip_line_comment(line).trim();
        let rest = if open_call {
            code
        } else if let Some(rest) = strip_include_keyword(code) {
            open_call = rest.trim_start().starts_with('(');
            rest
        } else {
            continue;
        };
        paths.extend(quoted_strings(rest));
        if open_call && rest.contains(')') {
            open_call = false;
        }
    }
    paths
}

fn strip_include_keyword(code: &str) -> Option<&str> {
    let rest = code.strip_prefix("include")?;
    match rest.chars().next() {
        Some(c) if c == '(' || c.is_whitespace() => Some(rest),
        _ => None,
    }
}

fn strip_line_comment(line: &str) -> &str {
    let mut quote = None;
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match (quote, b) {
            (None, b'"' | b'\'') => quote = Some(b),
            (Some(q), c) if c == q => quote = None,
            (None, b'/') if bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
    }
    line
}

fn quoted_strings(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '"' || c == '\'' {
            let value: String = chars.by_ref().take_while(|&ch| ch != c).collect();
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_comment_keeps_slashes_inside_quotes() {
        assert_eq!(
            strip_line_comment(r#"include("a//b") // trailing"#),
            r#"include("a//b") "#
        );
    }

    #[test]
    fn strip_include_keyword_skips_include_build() {
        assert!(strip_include_keyword("includeBuild(\"../other\")").is_none());
        assert!(strip_include_keyword("include(\":api\")").is_some());
        assert!(strip_include_keyword("include ':api'").is_some());
    }

    #[test]
    fn quoted_strings_mixed_quotes() {
        assert_eq!(
            quoted_strings(r#"(":a", ':b')"#),
            vec![":a".to_string(), ":b".to_string()]
        );
    }
}
