//! Configuration structures for universal builds.
//!
//! Architectures, build modes, GN arguments, the package layout and the
//! optional TOML build profile.

mod arch;
mod builder;
mod core;
mod gn_args;
mod layout;
mod profile;

pub use arch::{Arch, BuildMode};
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use gn_args::{BuildConfiguration, GnValue, TARGET_CPU, encode_gn_args};
pub use layout::{BuildPaths, PackageLayout};
pub use profile::BuildProfile;
