//! File operations.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::Path;

use super::Context;
use crate::Error;

/// Common file permissions.
///
/// ### Note
///
/// Everything this tool writes sits next to private keys in the developer's
/// project, so all modes are owner-only.
#[repr(u32)]
#[derive(Clone, Copy)]
pub enum FileMode {
    /// Owner read and write (`0o600`).
    RW = file_modes::R | file_modes::W,
    /// Owner read, write, and traverse (`0o700`), for directories.
    RWX = file_modes::R | file_modes::W | file_modes::X,
}

impl fmt::Debug for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0o{:03o}", *self as u32)
    }
}

/// Defines low-level file permissions in octal that can be OR-ed together.
mod file_modes {
    pub const R: u32 = 0o400;
    pub const W: u32 = 0o200;
    pub const X: u32 = 0o100;
}

/// File operations.
///
/// These respect dry runs and generally give better error messages than
/// [`std::fs`].
impl Context {
    /// Creates the directory `path` and any missing ancestors with the given
    /// permissions, printing a message when something was created.
    ///
    /// It is not an error if `path` already exists.
    pub(crate) fn create_dir_all(&self, path: &str, mode: FileMode) -> Result<(), Error> {
        if self.common_args.dry_run {
            println!("Not creating {path:?} dir and its parents because --dry-run");
            return Ok(());
        }

        if Path::new(path).is_dir() {
            return Ok(());
        }

        fs::DirBuilder::new()
            .recursive(true)
            .mode(mode as u32)
            .create(path)
            .map_err(|err| {
                Error::new(format!(
                    "failed to create {path:?} dir or its parents: {err}"
                ))
            })?;
        println!("Created {path:?} dir");
        Ok(())
    }

    /// Creates a file at `path` with the given `contents` and `mode`.
    ///
    /// The parent directory must already exist, and the file must not.
    pub(crate) fn create_file(
        &self,
        path: &str,
        contents: &[u8],
        mode: FileMode,
    ) -> Result<(), Error> {
        if self.common_args.dry_run {
            println!("Not creating {path:?} file with mode {mode:?} because --dry-run");
            Ok(())
        } else {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .mode(mode as u32)
                .open(path)
                .map_err(|err| Error::new(format!("failed to create {path:?} file: {err}")))?;
            file.write_all(contents).map_err(|err| {
                Error::new(format!("failed to write contents to {path:?} file: {err}"))
            })
        }
    }

    /// Returns whether a file exists at `path`.
    ///
    /// For dry runs, reports that the file does not exist, so dry runs never
    /// prompt about overwriting.
    pub(crate) fn file_exists(&self, path: &str) -> Result<bool, Error> {
        if self.common_args.dry_run {
            println!("Not checking whether {path:?} exists because --dry-run");
            Ok(false)
        } else {
            Path::new(path).try_exists().map_err(|err| {
                Error::new(format!("failed to check whether {path:?} exists: {err}"))
            })
        }
    }

    /// Removes a file.
    ///
    /// It is not an error if the file or one of its ancestors does not exist.
    pub(crate) fn remove_file(&self, path: &str) -> Result<(), Error> {
        if self.common_args.dry_run {
            println!("Not removing {path:?} because --dry-run");
        } else {
            match fs::remove_file(path) {
                Ok(()) => {
                    println!("Deleted {path:?} file");
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    // nothing to do
                }
                Err(err) => {
                    return Err(Error::new(format!("failed to delete {path:?} file: {err}")));
                }
            }
        }
        Ok(())
    }
}
