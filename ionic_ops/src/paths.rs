//! Module to deal with filesystem paths.
//!
//! #### Note
//!
//! This program stores all paths as UTF-8 strings so they can be printed
//! conveniently (typically as `Debug` so special characters are escaped). The
//! `camino` crate would be nicer but probably isn't worth adding a dependency
//! here.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::Error;

/// Private global used to access the [`Paths`] singleton, even before `main`
/// runs.
///
/// This is normally accessed through [`crate::Context::paths`] or, if that's
/// not yet available, through [`Paths::get`].
static PATHS: OnceLock<Paths> = OnceLock::new();

/// Well-known filesystem paths.
///
/// A singleton value is normally accessed through [`crate::Context::paths`]
/// or, if that's not yet available, through [`Paths::get`].
#[derive(Debug)]
pub struct Paths {
    /// Paths inside the enclosing Ionic project, if the working directory is
    /// inside one.
    pub project: Option<ProjectPaths>,

    /// The OpenSSL executable used to generate keys and certificates,
    /// normally found through `$PATH`.
    pub openssl: String,

    /// The directory for scratch files: `$TMPDIR`, or `/tmp` if unset.
    pub temp_dir: String,
}

/// Paths inside an Ionic project.
#[derive(Debug)]
pub struct ProjectPaths {
    /// The project root: the nearest ancestor of the working directory
    /// containing `ionic.config.json`.
    pub project_dir: String,

    /// The directory where generated TLS assets live unless told otherwise:
    /// `.ionic/ssl` under the project root.
    pub ssl_dir: String,
}

impl Paths {
    /// Returns a handle to the [`Paths`] singleton.
    ///
    /// Callers should prefer [`crate::Context::paths`] where possible.
    pub fn get() -> &'static Self {
        PATHS.get_or_init(|| {
            let project_dir = match env::var("IONIC_PROJECT_DIR") {
                Ok(dir) => Some(dir),
                Err(_) => find_project_dir(),
            };

            let project = project_dir.map(|project_dir| ProjectPaths {
                ssl_dir: join_path(&project_dir, ".ionic/ssl"),
                project_dir,
            });

            let openssl = env::var("OPENSSL").unwrap_or_else(|_| String::from("openssl"));

            let temp_dir = env::temp_dir()
                .into_os_string()
                .into_string()
                .expect("temp dir path contains invalid UTF-8");

            Self {
                project,
                openssl,
                temp_dir,
            }
        })
    }

    /// Returns the project paths, for commands that only make sense inside an
    /// Ionic project.
    pub fn require_project(&self) -> Result<&ProjectPaths, Error> {
        self.project.as_ref().ok_or_else(|| {
            Error::new(
                "not inside an Ionic project (no ionic.config.json found in the working \
                 directory or any of its parents; set $IONIC_PROJECT_DIR to override)",
            )
        })
    }
}

/// Searches the working directory and its ancestors for a directory
/// containing `ionic.config.json`.
fn find_project_dir() -> Option<String> {
    let mut dir: PathBuf = env::current_dir().expect("failed to get current working directory");
    loop {
        if dir.join("ionic.config.json").is_file() {
            return Some(
                dir.into_os_string()
                    .into_string()
                    .expect("project path contains invalid UTF-8"),
            );
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Returns `path` unchanged if it is absolute, or joined to the current
/// working directory otherwise.
pub fn absolute_path(path: &str) -> String {
    if Path::new(path).has_root() {
        path.to_owned()
    } else {
        let cwd = env::current_dir().expect("failed to get current working directory");
        join_path(
            cwd.to_str().expect("current working directory is invalid UTF-8"),
            path,
        )
    }
}

/// Returns the directory containing `path`, which must be absolute.
pub fn parent_dir(path: &str) -> &str {
    match Path::new(path).parent() {
        // The input was UTF-8 so the prefix is also UTF-8.
        Some(parent) => parent.to_str().expect("invalid UTF-8"),
        None => panic!("no parent directory for {path:?}"),
    }
}

/// Returns two filesystem path components combined together.
///
/// `child` must be a relative path.
pub fn join_path(parent: &str, child: &str) -> String {
    join_paths(&[parent, child])
}

/// Returns multiple filesystem path components combined together.
///
/// Every component but the first must be a relative path.
pub fn join_paths(paths: &[&str]) -> String {
    let (first, rest) = paths.split_first().expect("need at least 1 path to join");
    let mut joined = PathBuf::from(first);
    for path in rest {
        let path = Path::new(path);
        assert!(!path.has_root(), "refuse to join to absolute paths");
        joined.push(path);
    }
    // The input was UTF-8 so the result should also be UTF-8.
    joined
        .into_os_string()
        .into_string()
        .expect("invalid UTF-8")
}
