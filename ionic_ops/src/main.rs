//! Developer tool for Ionic projects, wrapping the external commands that
//! manage local TLS assets.

use clap::Parser;
use std::process::ExitCode;

use ionic_ops::{commands, Args, Context, Paths};

/// Runs the program.
fn main() -> ExitCode {
    let args = Args::parse();

    let context = Context {
        common_args: args.common,
        paths: Paths::get(),
    };

    match commands::run(&args.command, &context) {
        Ok(()) => ExitCode::SUCCESS,

        Err(error) => {
            eprintln!("ERROR: {error}");
            ExitCode::FAILURE
        }
    }
}
