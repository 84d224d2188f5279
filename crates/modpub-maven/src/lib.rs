//! Maven publication model: repositories and credentials, publications, POM
//! rendering, and the registrar that hands them to a publishing host.

pub mod host;
pub mod pom;
pub mod publication;
pub mod registrar;
pub mod repository;
pub mod staging;
