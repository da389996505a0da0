//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap and the
//! [`RuntimeConfig`] resolved from it.

use clap::Parser;
use path_absolutize::Absolutize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CliError, Result};
use crate::universal::{BuildMode, BuildProfile, ToolSearchPaths};

/// Builds a framework per architecture and merges the slices
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_universal",
    version,
    about = "Collect and build a universal iOS framework",
    long_about = "Builds the framework once per architecture with GN + Ninja (from depot_tools),
then merges the per-architecture builds into one framework with lipo.

Usage:
  kodegen_bundler_universal --source-dir /work/webrtc/src --is-release
  kodegen_bundler_universal -s ../src --use-bitcode --enable-vp9
  kodegen_bundler_universal -s ../src --profile universal.toml --skip-build

Outputs land in <source-dir>/out/<Debug|Release>/."
)]
pub struct Args {
    /// Source tree root. Example: /realpath/to/src
    ///
    /// Defaults to the parent of the current directory.
    #[arg(short = 's', long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Release build (default is debug)
    #[arg(short = 'r', long)]
    pub is_release: bool,

    /// Embed bitcode instead of generating dSYMs
    #[arg(long)]
    pub use_bitcode: bool,

    /// Build the VP9 software codec
    #[arg(long)]
    pub enable_vp9: bool,

    /// TOML build profile overriding architectures, targets and layout
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Directories searched for depot_tools before PATH
    #[arg(long, value_name = "PATHS", env = "KODEGEN_TOOL_PATH")]
    pub tool_path: Option<OsString>,

    /// Kill any external command running longer than this many seconds
    #[arg(long, value_name = "SECONDS", env = "KODEGEN_BUILD_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip the per-architecture builds and only merge existing outputs
    #[arg(long)]
    pub skip_build: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.timeout == Some(0) {
            return Err("Timeout must be at least one second".to_string());
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Absolute source tree root
    pub source_dir: PathBuf,
    /// Debug or release
    pub mode: BuildMode,
    /// Embed bitcode
    pub bitcode: bool,
    /// Build VP9
    pub enable_vp9: bool,
    /// Loaded (or default) build profile
    pub profile: BuildProfile,
    /// Initial toolchain search paths
    pub tool_paths: ToolSearchPaths,
    /// Per-command timeout
    pub timeout: Option<Duration>,
    /// Merge only
    pub skip_build: bool,
}

impl RuntimeConfig {
    /// Resolves paths and loads the build profile.
    pub fn from_args(args: &Args) -> Result<Self> {
        args.validate()
            .map_err(|reason| CliError::InvalidArguments { reason })?;

        let source_dir = match &args.source_dir {
            Some(dir) => dir.absolutize()?.into_owned(),
            None => std::env::current_dir()?.join("..").absolutize()?.into_owned(),
        };

        let profile = match &args.profile {
            Some(path) => BuildProfile::load(path)?,
            None => BuildProfile::default(),
        };

        Ok(Self {
            source_dir,
            mode: BuildMode::from_release_flag(args.is_release),
            bitcode: args.use_bitcode,
            enable_vp9: args.enable_vp9,
            profile,
            tool_paths: ToolSearchPaths::from_env_value(args.tool_path.as_ref()),
            timeout: args.timeout.map(Duration::from_secs),
            skip_build: args.skip_build,
        })
    }
}
