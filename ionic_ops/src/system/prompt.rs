//! Interactive confirmation prompts.

use std::io::{self, Write};

use super::Context;
use crate::Error;

/// Yes/no questions for the operator.
///
/// These respect dry runs.
impl Context {
    /// Asks the operator `question` and waits for one line on stdin.
    ///
    /// Returns whether the answer was affirmative (`y` or `yes`, any case).
    /// An empty answer or EOF counts as no.
    ///
    /// For dry runs, the question is not asked and `true` is returned.
    pub(crate) fn confirm(&self, question: &str) -> Result<bool, Error> {
        if self.common_args.dry_run {
            println!("Not asking {question:?} because --dry-run");
            return Ok(true);
        }

        print!("{question} [y/N] ");
        io::stdout()
            .flush()
            .map_err(|err| Error::new(format!("failed to flush stdout: {err}")))?;

        let mut answer = String::new();
        io::stdin()
            .read_line(&mut answer)
            .map_err(|err| Error::new(format!("error reading from stdin: {err}")))?;

        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}
