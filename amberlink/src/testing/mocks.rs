//! Fake process runners for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use crate::core::StageOutcome;
use crate::errors::{DriverError, Result};
use crate::process::{ExternalCommand, ProcessRunner};

/// A process runner that records invocations instead of spawning.
///
/// Every command succeeds unless configured otherwise with
/// [`fail_command`](Self::fail_command) or
/// [`missing_program`](Self::missing_program).
#[derive(Debug, Default)]
pub struct RecordingProcessRunner {
    calls: Mutex<Vec<ExternalCommand>>,
    failures: Mutex<HashMap<String, Option<i32>>>,
    missing: Mutex<HashSet<String>>,
}

impl RecordingProcessRunner {
    /// Creates a runner where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the command with this exact command line exit with `exit_code`.
    #[must_use]
    pub fn fail_command(self, command_line: impl Into<String>, exit_code: Option<i32>) -> Self {
        self.failures.lock().insert(command_line.into(), exit_code);
        self
    }

    /// Makes every invocation of `program` fail to spawn.
    #[must_use]
    pub fn missing_program(self, program: impl Into<String>) -> Self {
        self.missing.lock().insert(program.into());
        self
    }

    /// Returns every command run so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ExternalCommand> {
        self.calls.lock().clone()
    }

    /// Returns the command lines run so far, in order.
    #[must_use]
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(ExternalCommand::command_line).collect()
    }

    /// Returns the number of commands run.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forgets recorded calls, keeping the configured failures.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl ProcessRunner for RecordingProcessRunner {
    async fn run(&self, command: &ExternalCommand) -> Result<StageOutcome> {
        self.calls.lock().push(command.clone());

        if self.missing.lock().contains(&command.program) {
            return Err(DriverError::spawn(
                command.program.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            ));
        }

        let line = command.command_line();
        let failure = self.failures.lock().get(&line).copied();
        Ok(match failure {
            Some(exit_code) => StageOutcome::failure(&line, exit_code),
            None => StageOutcome::success(&line),
        })
    }
}
