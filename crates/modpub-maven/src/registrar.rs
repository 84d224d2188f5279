//! Registration of one Maven publication and one repository per manifest entry.
//!
//! The registrar never looks subprojects up itself: callers bind manifest
//! entries to [`SubprojectHandle`]s first (see
//! [`Workspace::bind`](modpub_core::workspace::Workspace::bind)), which
//! rejects unknown names before anything reaches the host.

use modpub_core::manifest::ManifestDocument;
use modpub_core::settings::PublicationTarget;
use modpub_core::workspace::{BoundModule, SubprojectHandle, Workspace};

use crate::publication::MavenPublication;
use crate::repository::MavenRepository;

/// The build system receiving publication configuration.
pub trait PublishingHost {
    /// Add `publication` to the publications of `subproject`.
    fn register_publication(
        &mut self,
        subproject: &SubprojectHandle,
        publication: &MavenPublication,
    ) -> miette::Result<()>;

    /// Add `repository` as a publishing target of `subproject`.
    fn configure_repository(
        &mut self,
        subproject: &SubprojectHandle,
        repository: &MavenRepository,
    ) -> miette::Result<()>;
}

/// What was registered for one subproject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub subproject: SubprojectHandle,
    pub publication: MavenPublication,
    pub repository: MavenRepository,
}

impl Registration {
    /// Where the POM lands in the target repository.
    pub fn pom_url(&self) -> String {
        self.repository.pom_url(
            &self.publication.group_id,
            &self.publication.artifact_id,
            &self.publication.version,
        )
    }
}

/// Turns bound manifest entries into host registrations against one target.
#[derive(Debug, Clone)]
pub struct PublicationRegistrar {
    repository: MavenRepository,
}

impl PublicationRegistrar {
    pub fn new(target: &PublicationTarget) -> Self {
        Self {
            repository: MavenRepository::for_target(target),
        }
    }

    pub fn repository(&self) -> &MavenRepository {
        &self.repository
    }

    /// The registrations `register` would perform, without touching a host.
    pub fn plan(&self, modules: &[BoundModule]) -> Vec<Registration> {
        modules
            .iter()
            .map(|module| Registration {
                subproject: module.subproject.clone(),
                publication: MavenPublication::for_module(&module.descriptor),
                repository: self.repository.clone(),
            })
            .collect()
    }

    /// Register each module with `host`, in manifest order.
    ///
    /// The first host error aborts the pass.
    pub fn register<H>(
        &self,
        modules: &[BoundModule],
        host: &mut H,
    ) -> miette::Result<Vec<Registration>>
    where
        H: PublishingHost + ?Sized,
    {
        let registrations = self.plan(modules);
        for registration in &registrations {
            host.register_publication(&registration.subproject, &registration.publication)?;
            host.configure_repository(&registration.subproject, &registration.repository)?;
            tracing::info!(
                "Registered {} for {} -> {}",
                registration.publication.coordinate(),
                registration.subproject.path(),
                registration.repository.url
            );
        }
        Ok(registrations)
    }
}

/// Bind every manifest entry to its subproject, then register them all.
///
/// Binding covers the whole manifest before the host sees any call, so an
/// unresolved subproject leaves the host untouched.
pub fn register<H>(
    manifest: &ManifestDocument,
    workspace: &Workspace,
    target: &PublicationTarget,
    host: &mut H,
) -> miette::Result<Vec<Registration>>
where
    H: PublishingHost + ?Sized,
{
    let modules = workspace.bind(manifest)?;
    PublicationRegistrar::new(target).register(&modules, host)
}
