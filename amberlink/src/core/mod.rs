//! Core domain model types for amberlink.
//!
//! This module contains the fundamental types shared by the pipeline,
//! the stager and the router:
//! - Stage status enum
//! - Per-command outcomes
//! - Binary descriptors and staged artifacts

mod artifact;
mod outcome;
mod status;

pub use artifact::{executable_name, BinaryDescriptor, StagedArtifact, HOST_EXE_SUFFIX};
pub use outcome::StageOutcome;
pub use status::StageStatus;
