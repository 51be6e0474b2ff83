//! Helpers for interacting with the operating system.

mod files;
mod process;
mod prompt;

use super::Context;
pub use files::FileMode;
pub use process::Process;
