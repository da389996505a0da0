//! GN generate + Ninja execute for a single build directory.

use std::path::{Path, PathBuf};

use super::runner::{CommandRunner, ToolCommand};
use crate::universal::{BuildConfiguration, Result, Toolchain, encode_gn_args};

/// Runs `gn gen` followed by `ninja` against one output directory.
#[derive(Debug)]
pub struct BuildInvoker<'a, R> {
    toolchain: &'a Toolchain,
    python: PathBuf,
    runner: &'a R,
}

impl<'a, R: CommandRunner> BuildInvoker<'a, R> {
    /// Creates an invoker. `python` launches the toolchain's `gn.py`.
    pub fn new(toolchain: &'a Toolchain, python: impl Into<PathBuf>, runner: &'a R) -> Self {
        Self {
            toolchain,
            python: python.into(),
            runner,
        }
    }

    /// `python gn.py gen <out_dir> --args=...`
    pub fn generate_command(&self, out_dir: &Path, config: &BuildConfiguration) -> ToolCommand {
        ToolCommand::new(&self.python)
            .arg(self.toolchain.generator())
            .arg("gen")
            .arg(out_dir)
            .arg(encode_gn_args(config))
    }

    /// `ninja -C <out_dir> <targets...>`
    pub fn execute_command(&self, out_dir: &Path, targets: &[String]) -> ToolCommand {
        ToolCommand::new(self.toolchain.executor())
            .arg("-C")
            .arg(out_dir)
            .args(targets)
    }

    /// Generates build files then builds `targets`.
    ///
    /// Ninja is not started when generation fails.
    pub async fn build(
        &self,
        out_dir: &Path,
        config: &BuildConfiguration,
        targets: &[String],
    ) -> Result<()> {
        let generate = self.generate_command(out_dir, config);
        log::info!("Gn args : {}", encode_gn_args(config));
        self.runner.run(&generate).await?;

        let execute = self.execute_command(out_dir, targets);
        log::info!("Ninja args : {}", targets.join(" "));
        self.runner.run(&execute).await
    }
}
