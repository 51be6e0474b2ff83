use clap::{self, Parser};

pub mod commands;
mod errors;
mod paths;
mod system;

pub use errors::Error;
use paths::{absolute_path, join_path, parent_dir};
pub use paths::Paths;
use system::Process;

/// Tool to manage TLS development assets for Ionic projects with safer and
/// more convenient command wrappers.
#[derive(Debug, Parser)]
#[clap(version = build_info::clap!())]
pub struct Args {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: commands::Command,
}

/// Global command-line arguments (part of [`Args`]). Available in [`Context`].
#[derive(Debug, Parser)]
pub struct CommonArgs {
    /// Don't execute commands but display them unambiguously.
    #[arg(long, global(true))]
    pub dry_run: bool,
}

/// There is one `Context` per invocation of this program. Commands use this to
/// access global state and call methods that need global state.
///
// Note: the `system` module also adds impls to Context.
pub struct Context {
    pub common_args: CommonArgs,
    pub paths: &'static Paths,
}
