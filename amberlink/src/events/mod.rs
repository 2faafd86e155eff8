//! Build lifecycle events.
//!
//! The pipeline reports each [`BuildEvent`] to an [`EventSink`] passed in by
//! the caller. Events carry an optional JSON payload.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the toolchain build's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildEvent {
    /// The pipeline is about to run its first stage.
    #[serde(rename = "pipeline.started")]
    PipelineStarted,
    /// A stage is about to run its first step.
    #[serde(rename = "stage.started")]
    StageStarted,
    /// A stage's binary was copied into the output directory.
    #[serde(rename = "artifact.staged")]
    ArtifactStaged,
    /// A stage ran all its steps and staged its binary.
    #[serde(rename = "stage.completed")]
    StageCompleted,
    /// A stage stopped the pipeline.
    #[serde(rename = "stage.failed")]
    StageFailed,
    /// Every stage completed.
    #[serde(rename = "pipeline.completed")]
    PipelineCompleted,
}

impl BuildEvent {
    /// Returns the dotted event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PipelineStarted => "pipeline.started",
            Self::StageStarted => "stage.started",
            Self::ArtifactStaged => "artifact.staged",
            Self::StageCompleted => "stage.completed",
            Self::StageFailed => "stage.failed",
            Self::PipelineCompleted => "pipeline.completed",
        }
    }
}

impl fmt::Display for BuildEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
