//! Process runner trait and the system implementation.

use super::ExternalCommand;
use crate::core::StageOutcome;
use crate::errors::{DriverError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tracing::debug;

/// Runs external commands to completion.
///
/// Implementations must not fail on a merely unsuccessful command: a
/// nonzero exit is reported through [`StageOutcome::succeeded`]. A missing
/// working directory yields [`DriverError::MissingWorkingDir`] and a
/// program that cannot be started yields [`DriverError::Spawn`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `command` in its working directory and waits for it to exit.
    async fn run(&self, command: &ExternalCommand) -> Result<StageOutcome>;
}

/// Runs commands as real child processes.
///
/// Output is inherited from the driver so build logs stay visible live.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    /// Creates a new system process runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, command: &ExternalCommand) -> Result<StageOutcome> {
        debug!(
            command = %command,
            working_dir = %command.working_dir().display(),
            "Spawning process"
        );

        if !command.working_dir().is_dir() {
            return Err(DriverError::MissingWorkingDir {
                path: command.working_dir().to_path_buf(),
            });
        }

        let status = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .current_dir(command.working_dir())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| DriverError::spawn(command.program.clone(), source))?;

        let outcome = StageOutcome::from_status(command.command_line(), status);
        debug!(
            command = %command,
            succeeded = outcome.succeeded,
            exit_code = ?outcome.exit_code,
            "Process exited"
        );
        Ok(outcome)
    }
}
