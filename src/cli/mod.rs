//! Command line interface for universal framework builds.
//!
//! Parses arguments, configures logging and drives the
//! locate -> build -> merge pipeline.

mod args;

pub use args::{Args, RuntimeConfig};

use crate::error::{CliError, Result};
use crate::universal::{
    ArtifactMerger, BuildOrchestrator, MergeReport, ProcessRunner, Settings, SettingsBuilder,
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(args.verbose);
    execute(&args).await
}

/// Configures `env_logger`: `debug` when verbose, `info` otherwise.
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// Runs the pipeline for already-parsed arguments.
///
/// Returns without building when the source directory does not exist.
pub async fn execute(args: &Args) -> Result<i32> {
    let config = RuntimeConfig::from_args(args)?;

    if !config.source_dir.is_dir() {
        log::error!("Src path not exists : {}", config.source_dir.display());
        return Ok(0);
    }

    let settings = SettingsBuilder::new()
        .source_root(&config.source_dir)
        .mode(config.mode)
        .bitcode(config.bitcode)
        .enable_vp9(config.enable_vp9)
        .profile(config.profile.clone())
        .build()?;
    let runner = ProcessRunner::new().with_timeout(config.timeout);

    if config.skip_build {
        log::info!("Skipping architecture builds");
    } else {
        let mut tool_paths = config.tool_paths.clone();
        let toolchain = tool_paths.resolve(Some(settings.source_root()), settings.profile())?;
        check_slice_tool(&settings)?;
        BuildOrchestrator::new(&settings, &toolchain, &runner)
            .build_all()
            .await?;
    }

    let report = ArtifactMerger::new(&settings, &runner).merge().await?;
    log_report(&report);
    log::info!("Done.");
    Ok(0)
}

/// Fails before any build starts if the slice tool cannot be found.
fn check_slice_tool(settings: &Settings) -> Result<()> {
    let lipo = &settings.profile().lipo;
    match which::which(lipo) {
        Ok(path) => {
            log::debug!("Found {} at: {}", lipo.display(), path.display());
            Ok(())
        }
        Err(e) => Err(CliError::ExecutionFailed {
            command: lipo.display().to_string(),
            reason: format!("slice tool not found: {}", e),
        }
        .into()),
    }
}

fn log_report(report: &MergeReport) {
    log::info!("Framework: {}", report.package_dir.display());
    for artifact in std::iter::once(&report.binary).chain(report.symbols.as_ref()) {
        let archs = artifact
            .archs
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        log::info!("  {} [{}]", artifact.path.display(), archs);
        log::info!("  SHA256: {}", artifact.checksum);
    }
}
