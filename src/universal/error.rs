//! Error types for toolchain discovery, builds and slice merging.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error as ThisError;

/// Result type for universal build operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while locating the toolchain, building architectures and
/// merging their artifacts.
#[derive(ThisError, Debug)]
pub enum Error {
    /// No candidate location contained a genuine toolchain installation.
    #[error("{name} not found (searched: {})", format_searched(.searched))]
    ToolchainNotFound {
        /// Toolchain directory name that was searched for
        name: String,
        /// Every candidate directory that was probed, in order
        searched: Vec<PathBuf>,
    },

    /// The external program could not be spawned or awaited.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Underlying spawn/wait error
        #[source]
        error: std::io::Error,
    },

    /// The external program exited unsuccessfully.
    #[error("`{command}` exited with {status}")]
    ProcessFailed {
        /// Rendered command line
        command: String,
        /// Exit status reported by the OS
        status: std::process::ExitStatus,
    },

    /// The external program exceeded the configured timeout and was killed.
    #[error("`{command}` timed out after {}s", .limit.as_secs())]
    Timeout {
        /// Rendered command line
        command: String,
        /// Limit that elapsed
        limit: Duration,
    },

    /// A required per-architecture slice is missing from its build directory.
    #[error("missing {arch} slice: {}", .path.display())]
    MissingSlice {
        /// Architecture whose slice is absent
        arch: String,
        /// Expected slice location
        path: PathBuf,
    },

    /// Filesystem error with the operation and path that caused it.
    #[error("{context} ({}): {error}", .path.display())]
    Fs {
        /// What was being attempted
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        error: std::io::Error,
    },

    /// Directory traversal error.
    #[error("directory walk failed: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Plain IO error without path context.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Catch-all error with a message.
    #[error("{0}")]
    GenericError(String),
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "nothing".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Exit code of the failing external command, if there is one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::ProcessFailed { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Adds path context to IO results.
pub trait ErrorExt<T> {
    /// Wraps the error with a description of the operation and the path.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts `None` into an [`Error::GenericError`].
pub trait Context<T> {
    /// Returns the value or an error carrying `msg`.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Returns early with a formatted [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::universal::Error::GenericError(format!($($arg)*)))
    };
}
