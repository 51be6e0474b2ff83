//! Things this tool can do.

use clap::{self, Subcommand};

pub mod meta;
pub mod ssl;

use super::{Context, Error};

/// A [`clap::Subcommand`] representing all the things this tool can do.
#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Meta(meta::Command),

    #[command(subcommand)]
    Ssl(ssl::Command),
}

/// Run the given command.
pub fn run(command: &Command, context: &Context) -> Result<(), Error> {
    match &command {
        Command::Meta(command) => meta::run(command, context),
        Command::Ssl(command) => ssl::run(command, context),
    }
}
