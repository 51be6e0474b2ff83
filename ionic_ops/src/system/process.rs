//! Spawning child processes.

use std::process;
use std::time::SystemTime;

use super::Context;
use crate::Error;

/// Describes a child process to be spawned.
///
/// The process can be spawned with [`Context::exec`].
///
/// This is similar to but simplified compared to [`std::process::Command`].
#[derive(Debug)]
pub struct Process<'a> {
    /// The program to execute.
    program: &'a str,
    /// Its arguments, not including the program name.
    args: &'a [&'a str],
}

impl<'a> Process<'a> {
    /// Build a description of a new child process.
    pub fn new(program: &'a str, args: &'a [&str]) -> Self {
        Self { program, args }
    }

    fn command(&self) -> process::Command {
        let mut command = process::Command::new(self.program);
        command.args(self.args);
        command
    }
}

/// Child processes.
///
/// These respect dry runs.
impl Context {
    /// Runs the given command and waits for it to complete.
    ///
    /// Returns an error if the command cannot be started or does not exit
    /// with a 0 status. Failing to start usually means the program is not
    /// installed.
    ///
    /// The child stdin, stdout, and stderr are inherited, so the tool's own
    /// diagnostics end up on the terminal.
    ///
    /// For dry runs, the command is not executed.
    pub(crate) fn exec(&self, process: Process) -> Result<(), Error> {
        if self.common_args.dry_run {
            println!("Not running because --dry-run:");
            println!("Spawning {process:#?}");
            return Ok(());
        }

        println!("Spawning {process:#?}");
        let start = SystemTime::now();

        let status = process
            .command()
            .status()
            .map_err(|err| Error::new(format!("failed to spawn {process:?}: {err}")))?;
        if !status.success() {
            return Err(Error::new(format!(
                "failed to run {process:?}: non-zero exit status (or signal)"
            )));
        }

        println!(
            "time elapsed: {:0.01} seconds",
            match start.elapsed() {
                Ok(duration) => duration.as_secs_f32(),
                Err(_) => f32::NAN,
            },
        );

        Ok(())
    }
}
