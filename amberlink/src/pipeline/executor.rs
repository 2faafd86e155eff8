//! Sequential build pipeline execution.
//!
//! Stages run strictly in declared order. The first failing step aborts
//! the run; binaries staged by earlier stages are left in place.

use super::report::PipelineReport;
use super::spec::toolchain_stages;
use crate::config::DriverConfig;
use crate::core::StagedArtifact;
use crate::errors::{DriverError, Result};
use crate::events::{BuildEvent, EventSink, NoOpEventSink};
use crate::observability::SpanTimer;
use crate::process::ProcessRunner;
use crate::stages::{BuildStage, StageResult};
use crate::staging::ArtifactStager;
use chrono::Utc;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Runs a fixed sequence of build stages and stages their binaries.
pub struct BuildPipeline {
    stages: Vec<BuildStage>,
    stager: ArtifactStager,
    runner: Arc<dyn ProcessRunner>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for BuildPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildPipeline")
            .field("stages", &self.stages)
            .field("output_dir", &self.stager.output_dir())
            .finish_non_exhaustive()
    }
}

impl BuildPipeline {
    /// Creates a pipeline over `stages`, staging into `output_dir`.
    #[must_use]
    pub fn new(
        stages: Vec<BuildStage>,
        output_dir: impl Into<std::path::PathBuf>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            stages,
            stager: ArtifactStager::new(output_dir),
            runner,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Creates the two-stage toolchain pipeline for `config`.
    #[must_use]
    pub fn for_toolchain(config: &DriverConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self::new(toolchain_stages(config), config.output_path(), runner)
    }

    /// Sets the event sink receiving lifecycle events.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[BuildStage] {
        &self.stages
    }

    /// Runs every stage in order, writing progress to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first failure: [`DriverError::StageFailure`] for a
    /// failing step, [`DriverError::MissingWorkingDir`] when a subproject
    /// directory is absent, [`DriverError::Spawn`] for a program that could
    /// not be started, [`DriverError::MissingArtifact`] when a stage produced
    /// no binary, or an IO error.
    pub async fn build(&self, out: &mut dyn Write) -> Result<PipelineReport> {
        let run_id = Uuid::new_v4();
        let timer = SpanTimer::start("pipeline");
        info!(%run_id, stages = self.stages.len(), "Starting toolchain build");
        self.sink
            .emit(
                BuildEvent::PipelineStarted,
                Some(json!({ "run_id": run_id.to_string(), "stages": self.stage_names() })),
            )
            .await;

        self.stager.ensure_output_dir()?;

        let mut report = PipelineReport::new(run_id);
        for stage in &self.stages {
            let started_at = Utc::now();
            match self.run_stage(stage, out).await {
                Ok(artifact) => {
                    let result = StageResult::completed(stage.name(), started_at, &artifact.path);
                    info!(
                        %run_id,
                        stage = stage.name(),
                        status = %result.status,
                        duration_ms = result.duration_ms(),
                        "Stage finished"
                    );
                    report.results.push(result);
                    report.staged.push(artifact);
                }
                Err(err) => {
                    debug!(%run_id, stage = stage.name(), error = %err, "Stage failed");
                    let result = StageResult::failed(stage.name(), started_at, err.to_string());
                    self.sink
                        .emit(BuildEvent::StageFailed, serde_json::to_value(&result).ok())
                        .await;
                    return Err(err);
                }
            }
        }

        writeln!(out, "Amberlink build complete.")?;
        for artifact in &report.staged {
            writeln!(
                out,
                "  {:<8} {}",
                artifact.canonical_name,
                artifact.path.display()
            )?;
        }

        let duration_ms = timer.finish();
        info!(%run_id, duration_ms, "Toolchain build complete");
        self.sink
            .emit(
                BuildEvent::PipelineCompleted,
                Some(json!({ "run_id": run_id.to_string(), "duration_ms": duration_ms })),
            )
            .await;
        Ok(report)
    }

    async fn run_stage(&self, stage: &BuildStage, out: &mut dyn Write) -> Result<StagedArtifact> {
        writeln!(out, "Building {}...", stage.name())?;
        self.sink
            .emit(BuildEvent::StageStarted, Some(json!({ "stage": stage.name() })))
            .await;

        if stage.creates_working_dir() {
            std::fs::create_dir_all(stage.working_dir())?;
        } else if !stage.working_dir().is_dir() {
            return Err(DriverError::MissingWorkingDir {
                path: stage.working_dir().to_path_buf(),
            });
        }

        for step in stage.steps() {
            info!(stage = stage.name(), command = %step, "Running step");
            let outcome = self.runner.run(step).await?;
            if !outcome.succeeded {
                writeln!(out, "Build failed in {}: {}", stage.name(), outcome.description)?;
                return Err(DriverError::stage_failure(
                    stage.name(),
                    step.command_line(),
                    outcome.exit_code,
                ));
            }
        }

        let artifact = self
            .stager
            .stage_descriptor(stage.name(), stage.produced_binary())?;
        self.sink
            .emit(
                BuildEvent::ArtifactStaged,
                Some(json!({
                    "stage": stage.name(),
                    "name": artifact.canonical_name,
                    "path": artifact.path.display().to_string(),
                })),
            )
            .await;
        self.sink
            .emit(BuildEvent::StageCompleted, Some(json!({ "stage": stage.name() })))
            .await;
        Ok(artifact)
    }

    fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(BuildStage::name).collect()
    }
}
