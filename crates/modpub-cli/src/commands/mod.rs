//! Command dispatch and handler modules.

mod plan;
mod settings;
mod stage;

use miette::Result;

use modpub_core::properties::parse_property_flag;
use modpub_ops::ops_context::ContextOptions;

use crate::cli::{BuildArgs, Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let options = context_options(&cli.build)?;
    match cli.command {
        Command::Plan => plan::exec(&options),
        Command::Stage => stage::exec(&options),
        Command::Settings { reveal } => settings::exec(&options, reveal),
    }
}

fn context_options(args: &BuildArgs) -> Result<ContextOptions> {
    let properties = args
        .properties
        .iter()
        .map(|flag| parse_property_flag(flag))
        .collect::<Result<Vec<_>>>()?;
    Ok(ContextOptions {
        root: args.root.clone(),
        manifest: args.manifest.clone(),
        properties,
    })
}
