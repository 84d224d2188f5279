//! Maven repository abstraction: URL layout and credentials.

use modpub_core::settings::PublicationTarget;

/// Name given to the publishing repository.
pub const PUBLISH_REPOSITORY_NAME: &str = "maven";

/// Username paired with the resolved access token.
pub const PUBLISH_USERNAME: &str = "yihuier";

/// Username/password pair for a repository. The password may be absent.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// A configured Maven repository with optional credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub credentials: Option<Credentials>,
}

impl MavenRepository {
    /// A repository without credentials. Trailing slashes are dropped from `url`.
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.trim_end_matches('/').to_string(),
            credentials: None,
        }
    }

    /// Attach a credential pair.
    pub fn with_credentials(mut self, username: &str, password: Option<&str>) -> Self {
        self.credentials = Some(Credentials {
            username: username.to_string(),
            password: password.map(str::to_string),
        });
        self
    }

    /// The publishing repository for a resolved target: its URL, the fixed
    /// username, and the token (if any) as password.
    pub fn for_target(target: &PublicationTarget) -> Self {
        Self::new(PUBLISH_REPOSITORY_NAME, target.url())
            .with_credentials(PUBLISH_USERNAME, target.token())
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `xyz.yihuier:api-client:1.2.0` becomes `xyz/yihuier/api-client/1.2.0`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Full URL to a specific file within the Maven repository.
    pub fn file_url(&self, group: &str, artifact: &str, version: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url,
            Self::coordinate_path(group, artifact, version),
            filename
        )
    }

    /// URL to the POM file for a given coordinate.
    pub fn pom_url(&self, group: &str, artifact: &str, version: &str) -> String {
        let filename = format!("{artifact}-{version}.pom");
        self.file_url(group, artifact, version, &filename)
    }

    /// URL to the JAR file for a given coordinate.
    pub fn jar_url(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        classifier: Option<&str>,
    ) -> String {
        let filename = match classifier {
            Some(c) => format!("{artifact}-{version}-{c}.jar"),
            None => format!("{artifact}-{version}.jar"),
        };
        self.file_url(group, artifact, version, &filename)
    }

    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.username.as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.credentials.as_ref().and_then(|c| c.password.as_deref())
    }

    /// Whether a password or token is configured.
    pub fn has_auth(&self) -> bool {
        self.password().is_some()
    }
}
