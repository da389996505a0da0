//! Merging per-architecture packages into one universal package.

use std::path::{Path, PathBuf};

use super::checksum::calculate_sha256;
use crate::universal::builder::{CommandRunner, ToolCommand};
use crate::universal::error::{Context, Error, Result};
use crate::universal::utils::fs::{copy_tree, remove_file_if_exists};
use crate::universal::{Arch, Settings};

/// A combined multi-architecture file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergedArtifact {
    /// Location of the combined file
    pub path: PathBuf,
    /// Architectures whose slices went into it
    pub archs: Vec<Arch>,
    /// Hex SHA-256 of the combined file
    pub checksum: String,
}

/// Outcome of a merge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergeReport {
    /// Merged package directory
    pub package_dir: PathBuf,
    /// Combined primary binary
    pub binary: MergedArtifact,
    /// Combined symbol binary, if the template had a symbol bundle
    pub symbols: Option<MergedArtifact>,
}

/// Merges the packages built for each architecture of a [`Settings`].
///
/// The first architecture is the template: its package tree is copied as-is,
/// then the binary (and symbol binary) are replaced by `lipo -create` output
/// over every architecture's slice. Running a merge again over the same build
/// directories overwrites the previous result.
#[derive(Debug)]
pub struct ArtifactMerger<'a, R> {
    settings: &'a Settings,
    runner: &'a R,
}

impl<'a, R: CommandRunner> ArtifactMerger<'a, R> {
    /// Creates a merger running the slice tool through `runner`.
    pub fn new(settings: &'a Settings, runner: &'a R) -> Self {
        Self { settings, runner }
    }

    /// Merges all architectures into `<out>/<mode>/`.
    pub async fn merge(&self) -> Result<MergeReport> {
        let paths = self.settings.paths();
        let layout = self.settings.layout();
        let output_dir = paths.mode_dir();

        let lib_dirs: Vec<(Arch, PathBuf)> = self
            .settings
            .archs()
            .iter()
            .map(|&arch| (arch, paths.arch_dir(arch)))
            .collect();
        let (_, template_dir) = lib_dirs.first().context("no architectures to merge")?;

        // Everything but the binary is identical across architectures.
        let package_dir = output_dir.join(&layout.package);
        copy_tree(&template_dir.join(&layout.package), &package_dir).await?;

        log::info!("Merging framework slices.");
        let binary_rel = layout.binary_path();
        let mut binary_slices = Vec::with_capacity(lib_dirs.len());
        for (arch, dir) in &lib_dirs {
            let slice = dir.join(&binary_rel);
            if !slice.is_file() {
                return Err(Error::MissingSlice {
                    arch: arch.to_string(),
                    path: slice,
                });
            }
            binary_slices.push((*arch, slice));
        }
        let binary = self
            .combine(&binary_slices, &output_dir.join(&binary_rel))
            .await?;

        let template_symbols = template_dir.join(&layout.symbols_bundle);
        let symbols = if template_symbols.is_dir() {
            copy_tree(&template_symbols, &output_dir.join(&layout.symbols_bundle)).await?;

            log::info!("Merging dSYM slices.");
            let symbols_rel = layout.symbols_binary_path();
            let mut symbol_slices = Vec::with_capacity(lib_dirs.len());
            for (arch, dir) in &lib_dirs {
                let slice = dir.join(&symbols_rel);
                if slice.is_file() {
                    symbol_slices.push((*arch, slice));
                } else {
                    log::warn!("No {} symbols at {}, leaving them out", arch, slice.display());
                }
            }

            if symbol_slices.is_empty() {
                log::warn!("Template symbol bundle has no symbol binary, skipping");
                None
            } else {
                Some(
                    self.combine(&symbol_slices, &output_dir.join(&symbols_rel))
                        .await?,
                )
            }
        } else {
            log::debug!(
                "No symbol bundle at {}, skipping symbol merge",
                template_symbols.display()
            );
            None
        };

        Ok(MergeReport {
            package_dir,
            binary,
            symbols,
        })
    }

    /// Replaces `dest` with the combination of `slices`.
    async fn combine(&self, slices: &[(Arch, PathBuf)], dest: &Path) -> Result<MergedArtifact> {
        remove_file_if_exists(dest).await?;

        let command = ToolCommand::new(&self.settings.profile().lipo)
            .args(slices.iter().map(|(_, path)| path))
            .args(["-create", "-output"])
            .arg(dest);
        self.runner.run(&command).await?;

        Ok(MergedArtifact {
            path: dest.to_path_buf(),
            archs: slices.iter().map(|(arch, _)| *arch).collect(),
            checksum: calculate_sha256(dest).await?,
        })
    }
}
