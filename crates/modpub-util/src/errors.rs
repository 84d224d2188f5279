use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all modpub operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ModpubError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The publish manifest could not be read, parsed, or is missing a required field.
    ///
    /// `index` is the zero-based position of the offending record in the
    /// `modules` array, when the problem is tied to one record.
    #[error("Malformed manifest{}: {message}", .index.map_or_else(String::new, |i| format!(" (module #{i})")))]
    #[diagnostic(help("Each entry in publish.json needs non-empty \"name\", \"artifactId\" and \"version\" strings"))]
    MalformedManifest {
        index: Option<usize>,
        message: String,
    },

    /// A manifest entry names a subproject that is not part of the build.
    #[error("Unresolved subproject: {name}")]
    #[diagnostic(help("Add the project to settings.gradle(.kts) or fix the \"name\" in publish.json"))]
    UnresolvedSubproject { name: String },

    /// Build properties or settings could not be loaded or parsed.
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// The publishing host rejected a registration.
    #[error("Publication error: {message}")]
    Publication { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ModpubResult<T> = miette::Result<T>;
