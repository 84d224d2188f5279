use std::collections::BTreeSet;

use modpub_core::workspace::SubprojectHandle;
use modpub_util::errors::ModpubError;

use crate::publication::MavenPublication;
use crate::registrar::PublishingHost;
use crate::repository::MavenRepository;

/// A [`PublishingHost`] that keeps every request in memory, in call order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    publications: Vec<(SubprojectHandle, MavenPublication)>,
    repositories: Vec<(SubprojectHandle, MavenRepository)>,
    names: BTreeSet<(String, String)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publications(&self) -> &[(SubprojectHandle, MavenPublication)] {
        &self.publications
    }

    pub fn repositories(&self) -> &[(SubprojectHandle, MavenRepository)] {
        &self.repositories
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty() && self.repositories.is_empty()
    }
}

impl PublishingHost for RecordingHost {
    /// A subproject can hold only one publication of a given name.
    fn register_publication(
        &mut self,
        subproject: &SubprojectHandle,
        publication: &MavenPublication,
    ) -> miette::Result<()> {
        let key = (subproject.path().to_string(), publication.name.clone());
        if !self.names.insert(key) {
            return Err(ModpubError::Publication {
                message: format!(
                    "Cannot add publication '{}' to {}: a publication with that name already exists",
                    publication.name,
                    subproject.path()
                ),
            }
            .into());
        }
        self.publications
            .push((subproject.clone(), publication.clone()));
        Ok(())
    }

    fn configure_repository(
        &mut self,
        subproject: &SubprojectHandle,
        repository: &MavenRepository,
    ) -> miette::Result<()> {
        self.repositories
            .push((subproject.clone(), repository.clone()));
        Ok(())
    }
}
