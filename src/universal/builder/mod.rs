//! Build orchestration and external command execution.
//!
//! # Module Organization
//!
//! - [`runner`] - [`CommandRunner`] seam and the child-process runner
//! - [`invoker`] - GN + Ninja for one build directory
//! - [`orchestrator`] - Main [`BuildOrchestrator`] looping over architectures

mod invoker;
mod orchestrator;
mod runner;

pub use invoker::BuildInvoker;
pub use orchestrator::{ArchBuild, BuildOrchestrator};
pub use runner::{CommandRunner, ProcessRunner, ToolCommand};
