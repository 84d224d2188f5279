use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use modpub_core::manifest::ModuleDescriptor;
use modpub_core::workspace::SubprojectHandle;

/// Name every registered publication carries.
pub const PUBLICATION_NAME: &str = "apiInterface";

/// Organizational group all modules are published under.
pub const PUBLICATION_GROUP: &str = "xyz.yihuier";

/// The build output a publication is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoftwareComponent {
    /// The subproject's main JAR.
    Java,
}

impl SoftwareComponent {
    pub fn name(self) -> &'static str {
        match self {
            Self::Java => "java",
        }
    }

    /// POM `<packaging>` value.
    pub fn packaging(self) -> &'static str {
        match self {
            Self::Java => "jar",
        }
    }

    /// Directory in which the subproject's build places this component's output.
    pub fn output_dir(self, subproject: &SubprojectHandle) -> PathBuf {
        match self {
            Self::Java => subproject.build_dir().join("libs"),
        }
    }
}

impl fmt::Display for SoftwareComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Maven publication registered for one subproject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenPublication {
    pub name: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub component: SoftwareComponent,
}

impl MavenPublication {
    /// The publication for a manifest entry: fixed name and group, the
    /// entry's artifactId and version, and the Java component.
    pub fn for_module(descriptor: &ModuleDescriptor) -> Self {
        Self {
            name: PUBLICATION_NAME.to_string(),
            group_id: PUBLICATION_GROUP.to_string(),
            artifact_id: descriptor.artifact_id.clone(),
            version: descriptor.version.clone(),
            component: SoftwareComponent::Java,
        }
    }

    /// `group:artifact:version`.
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
