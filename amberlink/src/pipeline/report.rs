//! Summary of a successful pipeline run.

use crate::core::StagedArtifact;
use crate::stages::StageResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// What a successful toolchain build produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Identifier correlating the run's log lines.
    pub run_id: Uuid,
    /// Per-stage results in execution order.
    pub results: Vec<StageResult>,
    /// Staged binaries in execution order.
    pub staged: Vec<StagedArtifact>,
}

impl PipelineReport {
    /// Creates an empty report for a new run.
    #[must_use]
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            results: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Returns the staged location of the binary with `canonical_name`.
    #[must_use]
    pub fn staged_path(&self, canonical_name: &str) -> Option<&Path> {
        self.staged
            .iter()
            .find(|artifact| artifact.canonical_name == canonical_name)
            .map(|artifact| artifact.path.as_path())
    }
}
