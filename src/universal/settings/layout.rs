//! Filesystem layout of per-architecture builds and the merged package.

use std::path::{Path, PathBuf};

use super::{Arch, BuildMode};

/// Names of the package, its binary and the optional symbol bundle.
///
/// All per-architecture paths are relative to `<out>/<mode>/<arch>`, merged
/// paths to `<out>/<mode>`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageLayout {
    /// Package directory, e.g. `WebRTC.framework`
    pub package: String,
    /// Binary file name inside the package
    pub binary: String,
    /// Symbol bundle directory, sibling of the package
    pub symbols_bundle: String,
    /// Path of the symbol binary inside the bundle
    pub symbols_binary: PathBuf,
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self {
            package: "WebRTC.framework".into(),
            binary: "WebRTC".into(),
            symbols_bundle: "WebRTC.dSYM".into(),
            symbols_binary: ["Contents", "Resources", "DWARF", "WebRTC"].iter().collect(),
        }
    }
}

impl PackageLayout {
    /// Binary path relative to a build directory.
    pub fn binary_path(&self) -> PathBuf {
        Path::new(&self.package).join(&self.binary)
    }

    /// Symbol binary path relative to a build directory.
    pub fn symbols_binary_path(&self) -> PathBuf {
        Path::new(&self.symbols_bundle).join(&self.symbols_binary)
    }
}

/// Directory scheme `<source_root>/<out>/<Debug|Release>/<arch>`.
#[derive(Clone, Debug)]
pub struct BuildPaths {
    source_root: PathBuf,
    out_dir: String,
    mode: BuildMode,
}

impl BuildPaths {
    /// Creates the scheme for one source tree and build mode.
    pub fn new(source_root: impl Into<PathBuf>, out_dir: impl Into<String>, mode: BuildMode) -> Self {
        Self {
            source_root: source_root.into(),
            out_dir: out_dir.into(),
            mode,
        }
    }

    /// `<source_root>/<out>/<mode>`, which also holds the merged output.
    pub fn mode_dir(&self) -> PathBuf {
        self.source_root.join(&self.out_dir).join(self.mode.dir_name())
    }

    /// Build directory owned by `arch`.
    pub fn arch_dir(&self, arch: Arch) -> PathBuf {
        self.mode_dir().join(arch.as_str())
    }

    /// Build mode these paths were derived for.
    pub fn mode(&self) -> BuildMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arch_dir_follows_mode_and_arch() {
        let paths = BuildPaths::new("/src", "out", BuildMode::Release);
        assert_eq!(paths.arch_dir(Arch::X64), Path::new("/src/out/Release/x64"));
        assert_eq!(paths.mode_dir(), Path::new("/src/out/Release"));
    }

    #[test]
    fn default_layout_matches_framework_structure() {
        let layout = PackageLayout::default();
        assert_eq!(layout.binary_path(), Path::new("WebRTC.framework/WebRTC"));
        assert_eq!(
            layout.symbols_binary_path(),
            Path::new("WebRTC.dSYM/Contents/Resources/DWARF/WebRTC")
        );
    }
}
