//! External build toolchain discovery.
//!
//! The toolchain is a `depot_tools` checkout: `gclient.py` marks a genuine
//! installation, `gn.py` generates build files and `ninja` executes them.
//! [`ToolSearchPaths`] remembers where it was found so repeated lookups in one
//! process resolve the same directory through the search path list.

mod locator;

pub use locator::{
    Located, Registration, Strategy, ToolchainQuery, VENDORED_PARENT, is_real_toolchain, locate,
};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{BuildProfile, Result};

/// Resolved toolchain directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Toolchain {
    root: PathBuf,
}

impl Toolchain {
    /// Wraps a directory already verified to be a toolchain.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Toolchain directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// GN entry point, launched through the Python interpreter.
    pub fn generator(&self) -> PathBuf {
        self.root.join("gn.py")
    }

    /// Ninja executable.
    pub fn executor(&self) -> PathBuf {
        self.root.join("ninja")
    }
}

/// Ordered list of directories consulted before `PATH`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolSearchPaths {
    entries: Vec<PathBuf>,
}

impl ToolSearchPaths {
    /// Creates a list from explicit entries.
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// Parses a platform path list (`:`-separated on Unix).
    pub fn from_env_value(value: Option<&OsString>) -> Self {
        let entries = value
            .map(|v| std::env::split_paths(v).filter(|p| !p.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        Self { entries }
    }

    /// Current entries, most preferred first.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Applies the side effect of a successful search.
    pub fn apply(&mut self, registration: &Registration) {
        match registration {
            Registration::Prepend(path) => self.entries.insert(0, path.clone()),
            Registration::Append(path) => {
                if !self.entries.contains(path) {
                    self.entries.push(path.clone());
                }
            }
        }
    }

    /// Locates the toolchain for `source_root` and records where it was found.
    ///
    /// `PATH` is read from the process environment and the upward walk starts
    /// at the directory of the running executable.
    pub fn resolve(&mut self, source_root: Option<&Path>, profile: &BuildProfile) -> Result<Toolchain> {
        let exec_path = std::env::var_os("PATH");
        let start_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        let located = locate(&ToolchainQuery {
            source_root,
            search_paths: &self.entries,
            exec_path: exec_path.as_deref(),
            start_dir: &start_dir,
            dir_name: &profile.toolchain_dir_name,
            marker: &profile.toolchain_marker,
        })?;

        log::debug!(
            "Found {} via {:?}: {}",
            profile.toolchain_dir_name,
            located.strategy,
            located.path.display()
        );
        self.apply(&located.registration);
        Ok(Toolchain::new(located.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_is_deduplicated_and_prepend_is_not() {
        let mut paths = ToolSearchPaths::new(vec![PathBuf::from("/a")]);
        paths.apply(&Registration::Append(PathBuf::from("/a")));
        paths.apply(&Registration::Append(PathBuf::from("/b")));
        paths.apply(&Registration::Prepend(PathBuf::from("/c")));

        assert_eq!(
            paths.entries(),
            &[PathBuf::from("/c"), PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }
}
