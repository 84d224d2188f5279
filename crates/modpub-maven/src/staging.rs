//! A [`PublishingHost`] that writes each publication's POM and checksums to
//! disk and records the repository configuration in a plan file.
//!
//! Layout, per subproject:
//!
//! ```text
//! <subproject>/build/publications/<publication>/pom-default.xml
//! <subproject>/build/publications/<publication>/pom-default.xml.{md5,sha1,sha256}
//! ```
//!
//! and `build/publish-plan.json` at the build root once [`StagingHost::finish`]
//! runs. Tokens are never written; the plan only records whether one is set.
//!
//! A failed pass leaves no partial output behind: a publication whose files
//! cannot all be written has its directory removed, and
//! [`StagingHost::discard`] removes everything staged earlier in the pass.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use modpub_core::workspace::SubprojectHandle;
use modpub_util::errors::ModpubError;
use modpub_util::fs::write_with_parents;
use modpub_util::hash::ChecksumAlgorithm;

use crate::pom::{render_pom, POM_FILE_NAME};
use crate::publication::{MavenPublication, SoftwareComponent};
use crate::registrar::PublishingHost;
use crate::repository::MavenRepository;

/// File name of the plan written at `<root>/build/`.
pub const PLAN_FILE_NAME: &str = "publish-plan.json";

#[derive(Debug, Clone)]
struct StagedPublication {
    subproject: SubprojectHandle,
    publication: MavenPublication,
    pom_path: PathBuf,
}

/// Writes POMs as publications are registered.
#[derive(Debug)]
pub struct StagingHost {
    root_dir: PathBuf,
    staged: Vec<StagedPublication>,
    repositories: BTreeMap<String, MavenRepository>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanEntry<'a> {
    subproject: &'a str,
    publication: &'a str,
    group_id: &'a str,
    artifact_id: &'a str,
    version: &'a str,
    component: SoftwareComponent,
    artifacts_dir: PathBuf,
    pom: &'a Path,
    repository: Option<RepositoryEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryEntry<'a> {
    name: &'a str,
    url: &'a str,
    pom_url: String,
    jar_url: String,
    username: Option<&'a str>,
    has_token: bool,
}

impl StagingHost {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            staged: Vec::new(),
            repositories: BTreeMap::new(),
        }
    }

    /// Directory holding a publication's staged files.
    pub fn publication_dir(subproject: &SubprojectHandle, publication_name: &str) -> PathBuf {
        subproject
            .build_dir()
            .join("publications")
            .join(publication_name)
    }

    /// Paths of every POM written so far, in registration order.
    pub fn staged_poms(&self) -> Vec<&Path> {
        self.staged.iter().map(|s| s.pom_path.as_path()).collect()
    }

    /// Write `build/publish-plan.json` at the build root and return its path.
    pub fn finish(self) -> miette::Result<PathBuf> {
        let entries: Vec<PlanEntry<'_>> = self
            .staged
            .iter()
            .map(|staged| {
                let publication = &staged.publication;
                let repository = self.repositories.get(staged.subproject.path()).map(|repo| {
                    RepositoryEntry {
                        name: &repo.name,
                        url: &repo.url,
                        pom_url: repo.pom_url(
                            &publication.group_id,
                            &publication.artifact_id,
                            &publication.version,
                        ),
                        jar_url: repo.jar_url(
                            &publication.group_id,
                            &publication.artifact_id,
                            &publication.version,
                            None,
                        ),
                        username: repo.username(),
                        has_token: repo.has_auth(),
                    }
                });
                PlanEntry {
                    subproject: staged.subproject.path(),
                    publication: &publication.name,
                    group_id: &publication.group_id,
                    artifact_id: &publication.artifact_id,
                    version: &publication.version,
                    component: publication.component,
                    artifacts_dir: publication.component.output_dir(&staged.subproject),
                    pom: &staged.pom_path,
                    repository,
                }
            })
            .collect();

        let json = serde_json::to_string_pretty(&entries).map_err(|e| ModpubError::Publication {
            message: format!("Failed to serialize publish plan: {e}"),
        })?;
        let path = self.root_dir.join("build").join(PLAN_FILE_NAME);
        write_with_parents(&path, json + "\n").map_err(ModpubError::Io)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Remove every publication directory staged so far without writing a plan.
    pub fn discard(self) {
        for staged in &self.staged {
            if let Some(dir) = staged.pom_path.parent() {
                remove_if_exists(dir);
            }
        }
        tracing::debug!("Discarded {} staged publication(s)", self.staged.len());
    }
}

fn write_publication(dir: &Path, pom_path: &Path, pom: &str) -> std::io::Result<()> {
    write_with_parents(pom_path, pom)?;
    for algorithm in ChecksumAlgorithm::ALL {
        let sidecar = dir.join(format!("{POM_FILE_NAME}.{}", algorithm.extension()));
        std::fs::write(&sidecar, algorithm.hex_digest(pom.as_bytes()))?;
    }
    Ok(())
}

fn remove_if_exists(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_dir_all(path) {
            tracing::warn!("Failed to remove directory {}: {e}", path.display());
        }
    }
}

impl PublishingHost for StagingHost {
    fn register_publication(
        &mut self,
        subproject: &SubprojectHandle,
        publication: &MavenPublication,
    ) -> miette::Result<()> {
        let dir = Self::publication_dir(subproject, &publication.name);
        let pom_path = dir.join(POM_FILE_NAME);
        if self.staged.iter().any(|s| s.pom_path == pom_path) {
            return Err(ModpubError::Publication {
                message: format!(
                    "Cannot add publication '{}' to {}: a publication with that name already exists",
                    publication.name,
                    subproject.path()
                ),
            }
            .into());
        }

        let pom = render_pom(publication)?;
        if let Err(e) = write_publication(&dir, &pom_path, &pom) {
            remove_if_exists(&dir);
            return Err(ModpubError::Io(e).into());
        }
        tracing::debug!("Staged {}", pom_path.display());

        self.staged.push(StagedPublication {
            subproject: subproject.clone(),
            publication: publication.clone(),
            pom_path,
        });
        Ok(())
    }

    fn configure_repository(
        &mut self,
        subproject: &SubprojectHandle,
        repository: &MavenRepository,
    ) -> miette::Result<()> {
        self.repositories
            .insert(subproject.path().to_string(), repository.clone());
        Ok(())
    }
}
