//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

use super::{Arch, BuildConfiguration, BuildMode, BuildPaths, BuildProfile, PackageLayout};

/// Settings for one universal build, constructed via [`SettingsBuilder`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_universal::universal::{BuildMode, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_universal::universal::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_root("/work/webrtc/src")
///     .mode(BuildMode::Release)
///     .bitcode(true)
///     .build()?;
///
/// assert!(settings.paths().mode_dir().ends_with("out/Release"));
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Root of the source tree being built.
    source_root: PathBuf,

    /// Debug or release.
    mode: BuildMode,

    /// Build with embedded bitcode instead of dSYMs.
    bitcode: bool,

    /// Build the VP9 software codec.
    enable_vp9: bool,

    /// Architectures, targets, layout and extra arguments.
    profile: BuildProfile,
}

impl Settings {
    /// Returns the source root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Returns the build mode.
    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Whether bitcode is embedded.
    pub fn bitcode(&self) -> bool {
        self.bitcode
    }

    /// Returns the build profile.
    pub fn profile(&self) -> &BuildProfile {
        &self.profile
    }

    /// Architectures in merge order.
    pub fn archs(&self) -> &[Arch] {
        &self.profile.archs
    }

    /// Ninja targets.
    pub fn targets(&self) -> &[String] {
        &self.profile.targets
    }

    /// Package layout.
    pub fn layout(&self) -> &PackageLayout {
        &self.profile.layout
    }

    /// Directory scheme for this source tree and mode.
    pub fn paths(&self) -> BuildPaths {
        BuildPaths::new(&self.source_root, &self.profile.out_dir, self.mode)
    }

    /// GN arguments shared by every architecture (no `target_cpu`).
    ///
    /// dSYMs and bitcode are mutually exclusive: bitcode builds skip symbols.
    pub fn base_configuration(&self) -> BuildConfiguration {
        let mut config = BuildConfiguration::new();
        config
            .set("target_os", "ios")
            .set("ios_enable_code_signing", false)
            .set("use_xcode_clang", true)
            .set("is_debug", self.mode.is_debug())
            .set(
                "ios_deployment_target",
                self.profile.ios_deployment_target.as_str(),
            )
            .set("enable_stripping", true)
            .set("enable_dsyms", !self.bitcode)
            .set("enable_ios_bitcode", self.bitcode);

        if self.enable_vp9 {
            config.set("rtc_libvpx_build_vp9", true);
        }

        for (key, value) in &self.profile.gn_args {
            config.set(key.as_str(), value.clone());
        }

        config
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        source_root: PathBuf,
        mode: BuildMode,
        bitcode: bool,
        enable_vp9: bool,
        profile: BuildProfile,
    ) -> Self {
        Self {
            source_root,
            mode,
            bitcode,
            enable_vp9,
            profile,
        }
    }
}
