use clap::{self, Subcommand};
use std::env;

use crate::{Context, Error};

/// Commands about this tool.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the paths of things on the filesystem, reflecting the current
    /// environment variables.
    ///
    /// The paths are controlled by the working directory and the environment
    /// variables $IONIC_PROJECT_DIR and $OPENSSL.
    Paths,
}

pub fn run(command: &Command, context: &Context) -> Result<(), Error> {
    match command {
        Command::Paths => {
            println!("Environment variables:");
            for var in ["IONIC_PROJECT_DIR", "OPENSSL"] {
                match env::var(var) {
                    Ok(value) => println!("    {var} is {value:?}"),
                    Err(env::VarError::NotPresent) => println!("    {var} is not set"),
                    Err(env::VarError::NotUnicode(value)) => {
                        println!("    {var} is invalid UTF-8: {value:?}")
                    }
                }
            }
            println!();

            println!("{:#?}", context.paths);
            Ok(())
        }
    }
}
