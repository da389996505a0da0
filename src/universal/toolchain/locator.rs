//! Fallback search for the toolchain directory.
//!
//! The search is pure: it only reads the filesystem and returns the resolved
//! directory together with the [`Registration`] the caller should apply to its
//! [`ToolSearchPaths`](super::ToolSearchPaths).

use std::ffi::OsStr;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::universal::{Error, Result};

/// Relative location of a vendored toolchain inside the source tree.
pub const VENDORED_PARENT: &str = "third_party";

/// Inputs of one toolchain search.
#[derive(Clone, Debug)]
pub struct ToolchainQuery<'a> {
    /// Source tree possibly containing a vendored copy.
    pub source_root: Option<&'a Path>,
    /// Tool search path list, most preferred first.
    pub search_paths: &'a [PathBuf],
    /// Value of the `PATH` environment variable.
    pub exec_path: Option<&'a OsStr>,
    /// Directory the upward walk starts from.
    pub start_dir: &'a Path,
    /// Toolchain directory name, e.g. `depot_tools`.
    pub dir_name: &'a str,
    /// File that must exist inside a genuine installation.
    pub marker: &'a str,
}

/// Strategy that produced a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// `<source_root>/third_party/<dir_name>`
    Vendored,
    /// Entry of the tool search path list
    SearchPath,
    /// Entry of `PATH`
    ExecPath,
    /// Ancestor of the start directory
    UpwardWalk,
}

/// Change to apply to the tool search path list after a successful search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Registration {
    /// Put the path in front of every other entry.
    Prepend(PathBuf),
    /// Add the path at the end unless already present.
    Append(PathBuf),
}

/// Successful search result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Located {
    /// Verified toolchain directory.
    pub path: PathBuf,
    /// Strategy that found it.
    pub strategy: Strategy,
    /// Side effect for the caller to apply.
    pub registration: Registration,
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Whether `path` is a genuine toolchain installation.
pub fn is_real_toolchain(path: &Path, marker: &str) -> bool {
    expand_home(path).join(marker).is_file()
}

/// Strips trailing separators from a search path entry.
fn trim_separators(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    let trimmed = text.trim_end_matches(MAIN_SEPARATOR).trim_end_matches('/');
    if trimmed.is_empty() {
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

/// Searches for the toolchain, first match wins:
///
/// 1. vendored copy under the source root
/// 2. search path entries named like the toolchain
/// 3. `PATH` entries
/// 4. `<ancestor>/<dir_name>` walking up from `start_dir`
///
/// Each candidate is accepted only if it contains the marker file.
pub fn locate(query: &ToolchainQuery<'_>) -> Result<Located> {
    let mut searched = Vec::new();
    let mut probe = |candidate: PathBuf| -> Option<PathBuf> {
        let expanded = expand_home(&candidate);
        searched.push(candidate);
        is_real_toolchain(&expanded, query.marker).then_some(expanded)
    };

    if let Some(root) = query.source_root {
        let vendored = root.join(VENDORED_PARENT).join(query.dir_name);
        if let Some(path) = probe(vendored) {
            log::debug!("Using vendored {} at {}", query.dir_name, path.display());
            return Ok(Located {
                registration: Registration::Prepend(path.clone()),
                path,
                strategy: Strategy::Vendored,
            });
        }
    }

    for entry in query.search_paths {
        let entry = trim_separators(entry);
        if entry.to_string_lossy().ends_with(query.dir_name) {
            if let Some(path) = probe(entry) {
                return Ok(Located {
                    registration: Registration::Append(path.clone()),
                    path,
                    strategy: Strategy::SearchPath,
                });
            }
        }
    }

    if let Some(exec_path) = query.exec_path {
        for entry in std::env::split_paths(exec_path) {
            if entry.as_os_str().is_empty() {
                continue;
            }
            if let Some(path) = probe(trim_separators(&entry)) {
                return Ok(Located {
                    registration: Registration::Append(path.clone()),
                    path,
                    strategy: Strategy::ExecPath,
                });
            }
        }
    }

    for ancestor in query.start_dir.ancestors() {
        if let Some(path) = probe(ancestor.join(query.dir_name)) {
            return Ok(Located {
                registration: Registration::Append(path.clone()),
                path,
                strategy: Strategy::UpwardWalk,
            });
        }
    }

    log::error!("Failed to find {}", query.dir_name);
    Err(Error::ToolchainNotFound {
        name: query.dir_name.to_string(),
        searched,
    })
}
