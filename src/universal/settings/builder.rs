//! Builder for constructing Settings.

use super::{BuildMode, BuildProfile, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_universal::universal::{BuildMode, BuildProfile, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_universal::universal::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_root("src")
///     .mode(BuildMode::Debug)
///     .enable_vp9(true)
///     .profile(BuildProfile::default())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    source_root: Option<PathBuf>,
    mode: Option<BuildMode>,
    bitcode: bool,
    enable_vp9: bool,
    profile: BuildProfile,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the source root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn source_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build mode.
    ///
    /// Default: [`BuildMode::Debug`]
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Embeds bitcode (and disables dSYMs).
    ///
    /// Default: false
    pub fn bitcode(mut self, bitcode: bool) -> Self {
        self.bitcode = bitcode;
        self
    }

    /// Builds the VP9 software codec.
    ///
    /// Default: false
    pub fn enable_vp9(mut self, enable: bool) -> Self {
        self.enable_vp9 = enable;
        self
    }

    /// Sets the build profile.
    ///
    /// Default: [`BuildProfile::default`]
    pub fn profile(mut self, profile: BuildProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `source_root` is missing or the profile lists no
    /// architectures.
    pub fn build(self) -> crate::universal::Result<Settings> {
        use crate::universal::error::Context;

        if self.profile.archs.is_empty() {
            crate::bail!("at least one architecture is required");
        }

        Ok(Settings::new(
            self.source_root.context("source_root is required")?,
            self.mode.unwrap_or(BuildMode::Debug),
            self.bitcode,
            self.enable_vp9,
            self.profile,
        ))
    }
}
