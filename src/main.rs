//! Kodegen Bundler Universal - multi-architecture framework builder.
//!
//! This binary builds a framework for each target architecture and merges
//! the slices into one universal framework with lipo.

use std::process;

use kodegen_bundler_universal::cli;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
