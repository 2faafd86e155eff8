//! Test assertions for pipeline runs.

use super::RecordingProcessRunner;
use crate::errors::DriverError;

/// Asserts that exactly these command lines ran, in this order.
pub fn assert_commands_run(runner: &RecordingProcessRunner, expected: &[&str]) {
    let actual = runner.command_lines();
    assert_eq!(
        actual, expected,
        "Expected commands {expected:?}, got {actual:?}"
    );
}

/// Asserts that `err` is a stage failure attributed to `stage`.
pub fn assert_stage_failed(err: &DriverError, stage: &str) {
    match err {
        DriverError::StageFailure { stage: actual, .. } => assert_eq!(
            actual, stage,
            "Expected stage '{stage}' to fail, but '{actual}' failed"
        ),
        other => panic!("Expected stage failure in '{stage}', got {other:?}"),
    }
}
