//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kodegen_bundler_universal::universal::{
    Arch, BuildMode, BuildPaths, CommandRunner, Error, PackageLayout, Result, ToolCommand,
};

/// Records every command instead of spawning it.
///
/// `lipo` invocations are emulated by concatenating the input slices into the
/// output file; a command matching `fail_on` fails without side effects.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<ToolCommand>>,
    fail_on: Option<Box<dyn Fn(&ToolCommand) -> bool + Send + Sync>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(predicate: impl Fn(&ToolCommand) -> bool + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(Box::new(predicate)),
        }
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().unwrap().clone()
    }

    /// Commands rendered as argument strings, program first.
    pub fn rendered(&self) -> Vec<Vec<String>> {
        self.calls()
            .iter()
            .map(|c| {
                std::iter::once(c.program().to_string_lossy().into_owned())
                    .chain(c.get_args().iter().map(|a| a.to_string_lossy().into_owned()))
                    .collect()
            })
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        self.calls.lock().unwrap().push(command.clone());

        if let Some(fail_on) = &self.fail_on {
            if fail_on(command) {
                return Err(Error::GenericError(format!("injected failure: {}", command)));
            }
        }

        if command.program().file_name().and_then(|n| n.to_str()) == Some("lipo") {
            let args = command.get_args();
            let create = args.iter().position(|a| a == "-create").unwrap();
            let output = args.iter().position(|a| a == "-output").unwrap();
            let mut combined = Vec::new();
            for input in &args[..create] {
                combined.extend(std::fs::read(input).unwrap());
            }
            std::fs::write(&args[output + 1], combined).unwrap();
        }

        Ok(())
    }
}

/// Writes a fake per-architecture package under `<root>/out/<mode>/<arch>`.
pub fn fake_arch_build(root: &Path, mode: BuildMode, arch: Arch, with_symbols: bool) -> PathBuf {
    let layout = PackageLayout::default();
    let dir = BuildPaths::new(root, "out", mode).arch_dir(arch);
    let package = dir.join(&layout.package);

    std::fs::create_dir_all(package.join("Headers")).unwrap();
    std::fs::write(package.join("Info.plist"), format!("plist from {}", arch)).unwrap();
    std::fs::write(package.join("Headers/RTCPeerConnection.h"), "@interface").unwrap();
    std::fs::write(dir.join(layout.binary_path()), format!("[{} binary]", arch)).unwrap();

    if with_symbols {
        let symbols = dir.join(layout.symbols_binary_path());
        std::fs::create_dir_all(symbols.parent().unwrap()).unwrap();
        std::fs::write(&symbols, format!("[{} dwarf]", arch)).unwrap();
        std::fs::write(
            dir.join(&layout.symbols_bundle).join("Contents/Info.plist"),
            "dsym plist",
        )
        .unwrap();
    }

    dir
}

/// Creates a directory that passes the toolchain marker check.
pub fn fake_toolchain(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("gclient.py"), "# marker").unwrap();
    dir.to_path_buf()
}
