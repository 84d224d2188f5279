//! CLI argument definitions for modpub.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "modpub",
    version,
    about = "Register Maven publications for the modules listed in publish.json",
    long_about = "modpub reads publish.json at the root of a multi-project build and \
                  registers one Maven publication plus repository credentials for every \
                  module it lists."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub build: BuildArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Set a build property (repeatable), e.g. -P mavenURL=https://...
    #[arg(short = 'P', long = "property", value_name = "KEY=VALUE", global = true)]
    pub properties: Vec<String>,

    /// Build root directory (defaults to the nearest directory with publish.json)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Path to the publish manifest
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the publication and repository registered for each module
    Plan,

    /// Write POMs, checksums and build/publish-plan.json for each module
    Stage,

    /// Show the resolved repository URL and access token
    Settings {
        /// Print the token instead of masking it
        #[arg(long)]
        reveal: bool,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
