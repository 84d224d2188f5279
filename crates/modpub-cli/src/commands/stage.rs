use miette::Result;

use modpub_ops::ops_context::{ContextOptions, PublishContext};
use modpub_ops::ops_stage::stage;
use modpub_util::errors::ModpubError;

pub fn exec(options: &ContextOptions) -> Result<()> {
    let cwd = std::env::current_dir().map_err(ModpubError::Io)?;
    let ctx = PublishContext::load(&cwd, options)?;
    let result = stage(&ctx)?;

    for (registration, pom) in result.registrations.iter().zip(&result.poms) {
        println!(
            "Staged {} ({})",
            registration.publication.coordinate(),
            pom.display()
        );
    }
    println!("Wrote {}", result.plan_path.display());

    Ok(())
}
