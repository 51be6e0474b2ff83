use std::fmt::{self, Write};

/// Returns a [`BuildInfo`] struct.
///
/// To minimize build churn, this should be called from a top-level crate,
/// which will need to include:
///
/// ```toml
/// [package]
/// build = "../build_info/build_script.rs"
///
/// [dependencies]
/// build_info = { workspace = true }
/// ```
///
/// in its `Cargo.toml`, adjusting the relative path accordingly.
#[macro_export]
macro_rules! get {
    () => {
        $crate::BuildInfo {
            git_branch: option_env!("BUILD_GIT_BRANCH"),
            git_hash: option_env!("BUILD_GIT_HASH"),
            hostname: env!("BUILD_HOSTNAME"),
            username: env!("BUILD_USERNAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Returns a version string for convenient use with clap.
///
/// Example:
///
/// ```ignore
/// #[command(version = build_info::clap!())]
/// struct Args {
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! clap {
    () => {
        $crate::get!().clap()
    };
}

/// Describes the environment where/when this code was built.
#[derive(Debug)]
pub struct BuildInfo {
    /// Git branch name, if any.
    ///
    /// This can be `None` in the detached head state, if outside of a git
    /// repo, or if the `git` program was unavailable.
    pub git_branch: Option<&'static str>,

    /// Git SHA-1 commit hash.
    ///
    /// This can be `None` if outside of a git repo or if the `git` program was
    /// unavailable.
    pub git_hash: Option<&'static str>,

    /// Short hostname (section before the dot).
    pub hostname: &'static str,

    /// Username.
    pub username: &'static str,

    /// Semver version number from `Cargo.toml` (for the crate running the
    /// build script and invoking the macro).
    pub version: &'static str,
}

impl BuildInfo {
    pub fn clap(&self) -> String {
        self.write_clap(String::new()).unwrap()
    }

    fn write_clap<W: Write>(&self, mut w: W) -> Result<W, fmt::Error> {
        let BuildInfo {
            git_branch,
            git_hash,
            hostname,
            username,
            version,
        } = self;

        // The first line has the program name on it already.
        writeln!(w, "{version}")?;
        if let Some(git_hash) = git_hash {
            writeln!(w, "git hash: {git_hash}")?;
        }
        if let Some(git_branch) = git_branch {
            writeln!(w, "git branch: {git_branch}")?;
        }
        writeln!(w, "build host: {hostname}")?;
        write!(w, "build user: {username}")?;
        // clap will add a newline.

        Ok(w)
    }
}
