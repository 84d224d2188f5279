//! Operation: compute the registrations for every manifest entry without
//! writing anything.

use modpub_maven::host::RecordingHost;
use modpub_maven::registrar::{register, Registration};

use crate::ops_context::PublishContext;

/// Register every manifest entry against an in-memory host.
pub fn plan(ctx: &PublishContext) -> miette::Result<Vec<Registration>> {
    let mut host = RecordingHost::new();
    register(&ctx.manifest, &ctx.workspace, &ctx.target, &mut host)
}
