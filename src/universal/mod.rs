//! Multi-architecture framework builds.
//!
//! A universal build runs GN + Ninja once per architecture and merges the
//! resulting packages into a single framework whose binary carries every
//! architecture slice.
//!
//! # Pipeline
//!
//! 1. [`ToolSearchPaths::resolve`] locates the `depot_tools` [`Toolchain`]
//! 2. [`BuildOrchestrator`] builds each [`Arch`] into `out/<mode>/<arch>`
//! 3. [`ArtifactMerger`] combines the packages into `out/<mode>/`
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_universal::universal::{
//!     ArtifactMerger, BuildMode, BuildOrchestrator, ProcessRunner, SettingsBuilder,
//!     ToolSearchPaths,
//! };
//!
//! # async fn example() -> kodegen_bundler_universal::universal::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .source_root("/work/webrtc/src")
//!     .mode(BuildMode::Release)
//!     .build()?;
//!
//! let toolchain = ToolSearchPaths::default()
//!     .resolve(Some(settings.source_root()), settings.profile())?;
//! let runner = ProcessRunner::new();
//!
//! BuildOrchestrator::new(&settings, &toolchain, &runner).build_all().await?;
//! let report = ArtifactMerger::new(&settings, &runner).merge().await?;
//! println!("{} ({})", report.binary.path.display(), report.binary.checksum);
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod error;
mod merge;
mod settings;
mod toolchain;
pub mod utils;

pub use builder::{ArchBuild, BuildInvoker, BuildOrchestrator, CommandRunner, ProcessRunner, ToolCommand};
pub use error::{Error, Result};
pub use merge::{ArtifactMerger, MergeReport, MergedArtifact, calculate_sha256};
pub use settings::{
    Arch, BuildConfiguration, BuildMode, BuildPaths, BuildProfile, GnValue, PackageLayout,
    Settings, SettingsBuilder, TARGET_CPU, encode_gn_args,
};
pub use toolchain::{
    Located, Registration, Strategy, ToolSearchPaths, Toolchain, ToolchainQuery, VENDORED_PARENT,
    is_real_toolchain, locate,
};
