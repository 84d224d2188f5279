//! Operation: write each publication's POM, checksums, and the publish plan.

use std::path::PathBuf;

use modpub_maven::registrar::{register, Registration};
use modpub_maven::staging::StagingHost;

use crate::ops_context::PublishContext;

/// Result of a stage operation.
#[derive(Debug)]
pub struct StageResult {
    pub registrations: Vec<Registration>,
    pub poms: Vec<PathBuf>,
    pub plan_path: PathBuf,
}

/// Register every manifest entry against a [`StagingHost`] rooted at the build root.
///
/// If any registration fails, the POMs staged before it are removed and no
/// plan is written.
pub fn stage(ctx: &PublishContext) -> miette::Result<StageResult> {
    let mut host = StagingHost::new(&ctx.root_dir);
    let registrations = match register(&ctx.manifest, &ctx.workspace, &ctx.target, &mut host) {
        Ok(registrations) => registrations,
        Err(e) => {
            host.discard();
            return Err(e);
        }
    };
    let poms: Vec<PathBuf> = host
        .staged_poms()
        .into_iter()
        .map(|p| p.to_path_buf())
        .collect();
    let plan_path = host.finish()?;
    Ok(StageResult {
        registrations,
        poms,
        plan_path,
    })
}
