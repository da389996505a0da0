//! Per-architecture build orchestration.
//!
//! This module provides the [`BuildOrchestrator`] that builds every
//! configured architecture, one after another, into its own directory.

use std::path::PathBuf;

use super::invoker::BuildInvoker;
use super::runner::CommandRunner;
use crate::universal::{Arch, Result, Settings, Toolchain};

/// Build output of one architecture.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArchBuild {
    /// Architecture that was built
    pub arch: Arch,
    /// Directory the build wrote into
    pub out_dir: PathBuf,
}

/// Builds each architecture of a [`Settings`] in order.
///
/// Every architecture gets its own clone of the base GN configuration with
/// `target_cpu` set, so builds never observe each other's arguments.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_universal::universal::{
///     BuildOrchestrator, ProcessRunner, SettingsBuilder, Toolchain,
/// };
///
/// # async fn example() -> kodegen_bundler_universal::universal::Result<()> {
/// let settings = SettingsBuilder::new().source_root("src").build()?;
/// let toolchain = Toolchain::new("src/third_party/depot_tools");
/// let runner = ProcessRunner::new();
///
/// let builds = BuildOrchestrator::new(&settings, &toolchain, &runner)
///     .build_all()
///     .await?;
/// println!("Built {} architectures", builds.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BuildOrchestrator<'a, R> {
    settings: &'a Settings,
    invoker: BuildInvoker<'a, R>,
}

impl<'a, R: CommandRunner> BuildOrchestrator<'a, R> {
    /// Creates an orchestrator running commands through `runner`.
    pub fn new(settings: &'a Settings, toolchain: &'a Toolchain, runner: &'a R) -> Self {
        Self {
            settings,
            invoker: BuildInvoker::new(toolchain, &settings.profile().python, runner),
        }
    }

    /// Builds all architectures in order.
    ///
    /// Stops at the first failure. Directories of architectures that already
    /// finished are left in place.
    pub async fn build_all(&self) -> Result<Vec<ArchBuild>> {
        let base = self.settings.base_configuration();
        let paths = self.settings.paths();
        let mut builds = Vec::with_capacity(self.settings.archs().len());

        for &arch in self.settings.archs() {
            let config = base.for_arch(arch);
            let out_dir = paths.arch_dir(arch);

            log::info!("Build dir : {}", out_dir.display());
            self.invoker
                .build(&out_dir, &config, self.settings.targets())
                .await?;

            builds.push(ArchBuild { arch, out_dir });
        }

        Ok(builds)
    }
}
