//! Resolution of the publication target (repository URL and access token).
//!
//! Each setting is resolved through [`resolve`] in a fixed order: an explicit
//! build property, then an environment variable, then a default literal.
//! Only an absent value falls through; a property set to an empty string
//! still wins over the environment.

use std::fmt;

use modpub_util::errors::ModpubError;

use crate::properties::BuildProperties;

/// Build property overriding the repository URL.
pub const URL_PROPERTY: &str = "mavenURL";

/// Build property supplying the repository access token.
pub const TOKEN_PROPERTY: &str = "mavenAccessToken";

/// Environment variable consulted when [`TOKEN_PROPERTY`] is unset.
pub const TOKEN_ENV_VAR: &str = "MAVEN_ACCESS_TOKEN";

/// Repository used when [`URL_PROPERTY`] is unset.
pub const DEFAULT_REPOSITORY_URL: &str = "https://maven.pkg.github.com/yihuier/core-ng-project";

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Property,
    Environment,
    Default,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => write!(f, "build property"),
            Self::Environment => write!(f, "environment"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A setting value together with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub provenance: Provenance,
}

/// Pick the first present candidate: property, then environment, then default.
pub fn resolve(
    property: Option<&str>,
    environment: Option<&str>,
    default: Option<&str>,
) -> Option<Resolved> {
    [
        (property, Provenance::Property),
        (environment, Provenance::Environment),
        (default, Provenance::Default),
    ]
    .into_iter()
    .find_map(|(candidate, provenance)| {
        candidate.map(|v| Resolved {
            value: v.to_string(),
            provenance,
        })
    })
}

/// The repository URL and access token every publication is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationTarget {
    pub url: Resolved,
    /// `None` is a valid outcome: the repository may accept anonymous or
    /// pre-authenticated uploads.
    pub token: Option<Resolved>,
}

impl PublicationTarget {
    /// Resolve the target from build properties and an environment lookup.
    ///
    /// The URL has no environment fallback; the token has no default.
    /// A `mavenURL` property that is set but blank is rejected.
    pub fn resolve<F>(properties: &BuildProperties, env: F) -> miette::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = resolve(
            properties.get(URL_PROPERTY),
            None,
            Some(DEFAULT_REPOSITORY_URL),
        )
        .unwrap_or_else(|| Resolved {
            value: DEFAULT_REPOSITORY_URL.to_string(),
            provenance: Provenance::Default,
        });
        if url.value.trim().is_empty() {
            return Err(ModpubError::Settings {
                message: format!("Build property '{URL_PROPERTY}' is set but empty"),
            }
            .into());
        }

        let env_token = env(TOKEN_ENV_VAR);
        let token = resolve(properties.get(TOKEN_PROPERTY), env_token.as_deref(), None);

        tracing::debug!("Repository URL {} (from {})", url.value, url.provenance);
        match &token {
            Some(t) => tracing::debug!("Access token set (from {})", t.provenance),
            None => tracing::debug!("No access token configured"),
        }

        Ok(Self { url, token })
    }

    pub fn url(&self) -> &str {
        &self.url.value
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.value.as_str())
    }
}
