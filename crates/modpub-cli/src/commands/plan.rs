use miette::Result;

use modpub_ops::ops_context::{ContextOptions, PublishContext};
use modpub_ops::ops_plan::plan;
use modpub_util::errors::ModpubError;

use super::settings::describe_token;

pub fn exec(options: &ContextOptions) -> Result<()> {
    let cwd = std::env::current_dir().map_err(ModpubError::Io)?;
    let ctx = PublishContext::load(&cwd, options)?;
    let registrations = plan(&ctx)?;

    if registrations.is_empty() {
        println!("No modules listed in {}", ctx.manifest_path.display());
        return Ok(());
    }

    println!(
        "Repository: {} ({})",
        ctx.target.url(),
        ctx.target.url.provenance
    );
    println!("Token: {}", describe_token(&ctx.target, false));
    println!();
    for registration in &registrations {
        let publication = &registration.publication;
        println!(
            "{} -> {} [{}, component {}]",
            registration.subproject.path(),
            publication.coordinate(),
            publication.name,
            publication.component
        );
        println!("    {}", registration.pom_url());
    }
    println!();
    println!("{} publication(s) registered", registrations.len());

    Ok(())
}
