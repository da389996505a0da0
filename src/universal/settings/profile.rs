//! Build profile: the tunable constants of a universal build.
//!
//! Every field has a default matching the stock WebRTC iOS build, so an empty
//! (or absent) profile file builds `WebRTC.framework` for arm64, arm and x64.
//!
//! ```toml
//! archs = ["arm64", "x64"]
//! targets = ["sdk:framework_objc"]
//! ios_deployment_target = "12.0"
//!
//! [gn_args]
//! rtc_include_tests = false
//!
//! [layout]
//! package = "WebRTC.framework"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Arch, GnValue, PackageLayout};

/// Deserialized build profile.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildProfile {
    /// Architectures to build, in merge order. The first one is the template.
    pub archs: Vec<Arch>,

    /// Ninja targets built in every architecture directory.
    pub targets: Vec<String>,

    /// Output root under the source tree.
    pub out_dir: String,

    /// `ios_deployment_target` GN argument.
    pub ios_deployment_target: String,

    /// Interpreter used to launch `gn.py`.
    pub python: PathBuf,

    /// Slice-combination tool.
    pub lipo: PathBuf,

    /// Toolchain directory name searched for.
    pub toolchain_dir_name: String,

    /// File whose presence marks a genuine toolchain directory.
    pub toolchain_marker: String,

    /// Additional GN arguments, applied after the defaults.
    pub gn_args: BTreeMap<String, GnValue>,

    /// Names of the package and symbol bundle.
    pub layout: PackageLayout,
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self {
            archs: Arch::DEFAULT.to_vec(),
            targets: vec!["sdk:framework_objc".into()],
            out_dir: "out".into(),
            ios_deployment_target: "10.0".into(),
            python: PathBuf::from("python3"),
            lipo: PathBuf::from("lipo"),
            toolchain_dir_name: "depot_tools".into(),
            toolchain_marker: "gclient.py".into(),
            gn_args: BTreeMap::new(),
            layout: PackageLayout::default(),
        }
    }
}

impl BuildProfile {
    /// Parses a profile from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a profile file.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::error::UniversalError::Cli(crate::error::CliError::ExecutionFailed {
                command: "read_profile".to_string(),
                reason: format!("Failed to read {}: {}", path.display(), e),
            })
        })?;
        let profile = Self::from_toml(&text)?;
        if profile.archs.is_empty() {
            return Err(crate::error::CliError::InvalidArguments {
                reason: format!("{}: archs must not be empty", path.display()),
            }
            .into());
        }
        Ok(profile)
    }
}
