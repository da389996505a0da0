//! Universal package assembly from per-architecture builds.
//!
//! - [`checksum`] - SHA-256 of combined artifacts
//! - [`merger`] - Main [`ArtifactMerger`]

mod checksum;
mod merger;

pub use checksum::calculate_sha256;
pub use merger::{ArtifactMerger, MergeReport, MergedArtifact};
