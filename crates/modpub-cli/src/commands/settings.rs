use miette::Result;

use modpub_core::settings::PublicationTarget;
use modpub_maven::repository::PUBLISH_USERNAME;
use modpub_ops::ops_context::ContextOptions;
use modpub_ops::ops_settings::resolve_target;
use modpub_util::errors::ModpubError;

pub fn exec(options: &ContextOptions, reveal: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(ModpubError::Io)?;
    let target = resolve_target(&cwd, options, |key| std::env::var(key).ok())?;

    println!("mavenURL = {} ({})", target.url(), target.url.provenance);
    println!("username = {PUBLISH_USERNAME}");
    println!("token = {}", describe_token(&target, reveal));

    Ok(())
}

/// Token value (masked unless `reveal`) with its source, or a note that none is set.
pub fn describe_token(target: &PublicationTarget, reveal: bool) -> String {
    match &target.token {
        Some(token) => {
            let value = if reveal { token.value.as_str() } else { "********" };
            format!("{value} ({})", token.provenance)
        }
        None => "<none>".to_string(),
    }
}
