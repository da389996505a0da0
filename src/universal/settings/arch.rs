//! CPU architecture types and utilities.

use std::fmt;

/// CPU architecture of one framework slice.
///
/// Names follow GN's `target_cpu` values, which are also used as the build
/// directory names under `out/<Debug|Release>/`.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_universal::universal::Arch;
///
/// let arch = Arch::Arm64;
/// assert_eq!(arch.as_str(), "arm64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// AArch64 devices (every iPhone since the 5s)
    Arm64,
    /// 32-bit ARMv7 devices
    Arm,
    /// x86_64 simulator
    X64,
    /// 32-bit simulator. Not part of the default set.
    X86,
}

impl Arch {
    /// Default architecture set, in merge order. The first entry is the
    /// template for architecture-independent files.
    ///
    /// x86 is left out because App Store submissions reject it.
    pub const DEFAULT: [Arch; 3] = [Arch::Arm64, Arch::Arm, Arch::X64];

    /// GN `target_cpu` value and build directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::Arm => "arm",
            Arch::X64 => "x64",
            Arch::X86 => "x86",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm64" => Ok(Arch::Arm64),
            "arm" => Ok(Arch::Arm),
            "x64" => Ok(Arch::X64),
            "x86" => Ok(Arch::X86),
            other => Err(format!(
                "Invalid architecture: {}. Valid architectures: arm64, arm, x64, x86",
                other
            )),
        }
    }
}

/// Debug or release build, selecting the `out/` subdirectory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// `is_debug=true`, built into `out/Debug`
    Debug,
    /// `is_debug=false`, built into `out/Release`
    Release,
}

impl BuildMode {
    /// Selects the mode from the CLI's release flag.
    pub fn from_release_flag(is_release: bool) -> Self {
        if is_release {
            BuildMode::Release
        } else {
            BuildMode::Debug
        }
    }

    /// Whether this is a debug build.
    pub fn is_debug(&self) -> bool {
        matches!(self, BuildMode::Debug)
    }

    /// Directory name under the output root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "Release",
        }
    }
}
