//! Error types for the amberlink driver.
//!
//! Every failure the driver can surface is a [`DriverError`] variant. The
//! variant decides the process exit status and the remediation hint shown to
//! the user, so callers never branch on message text.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exit status used for fatal failures without a more specific code.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status used for configuration errors.
pub const EXIT_CONFIG: i32 = 2;

/// The main error type for driver operations.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Missing or extra CLI arguments.
    #[error("{message}")]
    Usage {
        /// What was wrong with the invocation.
        message: String,
    },

    /// An external build command exited unsuccessfully.
    #[error("Stage '{stage}' failed while running `{step}`{}", describe_code(*exit_code))]
    StageFailure {
        /// The stage that failed.
        stage: String,
        /// The command line of the failing step.
        step: String,
        /// The step's exit code, if the process exited normally.
        exit_code: Option<i32>,
    },

    /// An external program could not be started at all.
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        /// The program that could not be started.
        program: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The directory a command must run in does not exist.
    #[error("Working directory {} does not exist", path.display())]
    MissingWorkingDir {
        /// The missing directory.
        path: PathBuf,
    },

    /// The compiler binary is absent when compiling a file.
    #[error("The toolchain has not been built yet: {} does not exist", path.display())]
    MissingPrerequisite {
        /// The expected compiler location.
        path: PathBuf,
    },

    /// A stage reported success but its binary was not produced.
    #[error("Stage '{stage}' succeeded but did not produce {}", path.display())]
    MissingArtifact {
        /// The stage that claimed success.
        stage: String,
        /// The binary that should have been produced.
        path: PathBuf,
    },

    /// The environment configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// The invalid setting.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => " (terminated by signal)".to_string(),
    }
}

impl DriverError {
    /// Creates a usage error.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Creates a stage failure error.
    #[must_use]
    pub fn stage_failure(
        stage: impl Into<String>,
        step: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::StageFailure {
            stage: stage.into(),
            step: step.into(),
            exit_code,
        }
    }

    /// Creates a spawn error.
    #[must_use]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true for errors that are guidance to the user rather than a
    /// failure of the driver. These are reported and exit successfully.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Usage { .. } | Self::MissingPrerequisite { .. })
    }

    /// Returns the process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } | Self::MissingPrerequisite { .. } => 0,
            Self::StageFailure {
                exit_code: Some(code),
                ..
            } if *code != 0 => *code,
            Self::Config { .. } => EXIT_CONFIG,
            _ => EXIT_FAILURE,
        }
    }

    /// Returns a hint telling the user how to fix the problem.
    #[must_use]
    pub fn fix_hint(&self) -> Option<String> {
        let hint = match self {
            Self::MissingPrerequisite { .. } => {
                "Run `amberlink init` first to build the toolchain.".to_string()
            }
            Self::Spawn { program, .. } => spawn_hint(program),
            Self::MissingWorkingDir { .. } => {
                "Run amberlink from the Amber project root, or set AMBERLINK_ROOT to it."
                    .to_string()
            }
            Self::MissingArtifact { .. } => {
                "Check the subproject's build configuration; the binary name may have changed."
                    .to_string()
            }
            Self::Config { .. } => {
                "Check the AMBERLINK_ROOT and AMBERLINK_PROFILE environment variables.".to_string()
            }
            _ => return None,
        };
        Some(hint)
    }
}

fn spawn_hint(program: &str) -> String {
    let name = Path::new(program)
        .file_stem()
        .map_or_else(|| program.to_string(), |stem| stem.to_string_lossy().into_owned());
    match name.as_str() {
        "cargo" => "Install Rust (https://rustup.rs) and make sure `cargo` is on your PATH.".to_string(),
        "cmake" => "Install CMake and make sure `cmake` is on your PATH.".to_string(),
        "amberc" => format!(
            "Check that `{program}` is executable, or rebuild it with `amberlink init`."
        ),
        _ => format!("Check that `{program}` exists and is executable."),
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DriverError>;
