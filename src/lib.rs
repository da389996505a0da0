//! Universal framework builder library
//!
//! Builds a GN/Ninja project (WebRTC's iOS framework by default) once per
//! target architecture and merges the results into a single framework whose
//! binary and dSYM carry every architecture slice.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod universal;

// Re-export commonly used types
pub use error::{CliError, Result, UniversalError};
