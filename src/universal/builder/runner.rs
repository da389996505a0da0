//! External command execution.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::universal::{Error, Result};

/// Grace period for a killed child to be reaped.
const KILL_GRACE: Duration = Duration::from_secs(10);

/// A program and its arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Starts a command line for `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Program to execute.
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    /// Arguments, excluding the program.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands to completion.
///
/// Implementations must fail when the command exits unsuccessfully.
pub trait CommandRunner {
    /// Runs `command` and waits for it to exit.
    fn run(&self, command: &ToolCommand) -> impl Future<Output = Result<()>>;
}

/// Runs commands as child processes sharing this process's stdio.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Runner that waits indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills any command still running after `limit`.
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand) -> Result<()> {
        log::debug!("Running: {}", command);

        let mut child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command.to_string(),
                error,
            })?;

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_elapsed) => {
                    log::warn!(
                        "{} timed out after {}s, terminating...",
                        command.program.display(),
                        limit.as_secs()
                    );
                    if let Err(e) = child.kill().await {
                        log::warn!("Failed to kill {}: {}", command.program.display(), e);
                    }
                    let _ = tokio::time::timeout(KILL_GRACE, child.wait()).await;
                    return Err(Error::Timeout {
                        command: command.to_string(),
                        limit,
                    });
                }
            },
            None => child.wait().await,
        };

        let status = waited.map_err(|error| Error::CommandFailed {
            command: command.to_string(),
            error,
        })?;

        if !status.success() {
            log::error!("Command failed ({}): {}", status, command);
            return Err(Error::ProcessFailed {
                command: command.to_string(),
                status,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_program_and_args() {
        let command = ToolCommand::new("/tools/ninja")
            .arg("-C")
            .args(["out/Debug/arm64", "sdk:framework_objc"]);
        assert_eq!(
            command.to_string(),
            "/tools/ninja -C out/Debug/arm64 sdk:framework_objc"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_process_failure() {
        let err = ProcessRunner::new()
            .run(&ToolCommand::new("sh").args(["-c", "exit 3"]))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_command_is_killed_on_timeout() {
        let err = ProcessRunner::new()
            .with_timeout(Some(Duration::from_millis(200)))
            .run(&ToolCommand::new("sleep").arg("30"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test]
    async fn missing_program_is_command_failure() {
        let err = ProcessRunner::new()
            .run(&ToolCommand::new("/definitely/not/a/program"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
