//! Testing utilities for amberlink.
//!
//! This module provides:
//! - A recording fake process runner
//! - Assertions over recorded invocations
//! - Temporary project fixtures (tests only)

mod assertions;
#[cfg(test)]
mod fixtures;
mod mocks;

pub use assertions::{assert_commands_run, assert_stage_failed};
#[cfg(test)]
pub use fixtures::ProjectFixture;
pub use mocks::RecordingProcessRunner;
