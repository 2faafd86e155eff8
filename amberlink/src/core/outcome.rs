//! Outcome of a single external command.

use serde::{Deserialize, Serialize};
use std::process::ExitStatus;

/// The result of running one external command to completion.
///
/// A failing command is still a successful *run*: the outcome simply
/// records `succeeded = false`. Only failing to start the program is an
/// error, see [`crate::errors::DriverError::Spawn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutcome {
    /// Whether the process exited with status zero.
    pub succeeded: bool,
    /// The exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Human readable description of how the command ended.
    pub description: String,
}

impl StageOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn success(command: impl AsRef<str>) -> Self {
        Self {
            succeeded: true,
            exit_code: Some(0),
            description: format!("`{}` succeeded", command.as_ref()),
        }
    }

    /// Creates a failed outcome with the given exit code.
    #[must_use]
    pub fn failure(command: impl AsRef<str>, exit_code: Option<i32>) -> Self {
        let description = match exit_code {
            Some(code) => format!("`{}` exited with code {code}", command.as_ref()),
            None => format!("`{}` was terminated by a signal", command.as_ref()),
        };
        Self {
            succeeded: false,
            exit_code,
            description,
        }
    }

    /// Builds an outcome from a process exit status.
    #[must_use]
    pub fn from_status(command: impl AsRef<str>, status: ExitStatus) -> Self {
        if status.success() {
            Self::success(command)
        } else {
            Self::failure(command, status.code())
        }
    }

    /// Returns the exit code to propagate for this outcome.
    ///
    /// Signal terminations map to `1`.
    #[must_use]
    pub fn propagated_code(&self) -> i32 {
        match self.exit_code {
            Some(code) => code,
            None if self.succeeded => 0,
            None => 1,
        }
    }
}
