//! Top-level error types for the command line tool.
//!
//! Build failures carry the failing command so the process can exit with that
//! command's exit code.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, UniversalError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum UniversalError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Build profile parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Toolchain, build and merge errors
    #[error("Build error: {0}")]
    Build(#[from] crate::universal::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl UniversalError {
    /// Process exit code for this error.
    ///
    /// A failed external command propagates its own exit code; everything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            UniversalError::Build(e) => e.exit_code().filter(|&code| code != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
