//! End-to-end tests for the toolchain pipeline against a fake runner.

#[cfg(test)]
mod tests {
    use crate::core::{executable_name, HOST_EXE_SUFFIX};
    use crate::errors::DriverError;
    use crate::events::{BuildEvent, CollectingEventSink};
    use crate::pipeline::BuildPipeline;
    use crate::testing::{
        assert_commands_run, assert_stage_failed, ProjectFixture, RecordingProcessRunner,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const ALL_STEPS: [&str; 3] = ["cargo build", "cmake ..", "cmake --build ."];

    fn exe(name: &str) -> String {
        executable_name(name, HOST_EXE_SUFFIX)
    }

    fn pipeline(fixture: &ProjectFixture, runner: &Arc<RecordingProcessRunner>) -> BuildPipeline {
        BuildPipeline::for_toolchain(fixture.config(), runner.clone())
    }

    #[tokio::test]
    async fn test_successful_build_stages_both_binaries() {
        let fixture = ProjectFixture::new();
        fixture.write_compiler_output(b"compiler v1");
        fixture.write_runtime_output(b"vm v1");
        let runner = Arc::new(RecordingProcessRunner::new());
        let mut out = Vec::new();

        let report = pipeline(&fixture, &runner).build(&mut out).await.unwrap();

        assert_commands_run(&runner, &ALL_STEPS);
        assert_eq!(fixture.output_files(), vec![exe("amberc"), exe("avm")]);
        assert_eq!(fixture.read_output(&exe("amberc")), b"compiler v1");
        assert_eq!(fixture.read_output(&exe("avm")), b"vm v1");
        assert_eq!(report.staged.len(), 2);
        assert!(report.results.iter().all(|r| r.is_success()));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Building amber-core..."));
        assert!(text.contains("Building amber-vm..."));
        assert!(text.contains("Amberlink build complete."));
        let compiler = report.staged_path("amberc").unwrap();
        assert!(text.contains(&compiler.display().to_string()));
    }

    #[tokio::test]
    async fn test_steps_run_in_their_working_directories() {
        let fixture = ProjectFixture::new();
        fixture.write_compiler_output(b"c");
        fixture.write_runtime_output(b"v");
        let runner = Arc::new(RecordingProcessRunner::new());

        pipeline(&fixture, &runner).build(&mut Vec::new()).await.unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].working_dir(), fixture.config().compiler_path());
        assert_eq!(calls[1].working_dir(), fixture.config().runtime_build_path());
        assert_eq!(calls[2].working_dir(), fixture.config().runtime_build_path());
    }

    #[tokio::test]
    async fn test_compiler_failure_skips_runtime_stage() {
        let fixture = ProjectFixture::new();
        let runner = Arc::new(RecordingProcessRunner::new().fail_command("cargo build", Some(101)));
        let mut out = Vec::new();

        let err = pipeline(&fixture, &runner).build(&mut out).await.unwrap_err();

        assert_stage_failed(&err, "amber-core");
        assert_eq!(err.exit_code(), 101);
        assert_commands_run(&runner, &["cargo build"]);
        assert!(fixture.output_files().is_empty());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Build failed in amber-core"));
        assert!(text.contains("`cargo build` exited with code 101"));
        assert!(!text.contains("Building amber-vm"));
    }

    #[tokio::test]
    async fn test_runtime_failure_keeps_staged_compiler() {
        let fixture = ProjectFixture::new();
        fixture.write_compiler_output(b"compiler");
        let runner = Arc::new(RecordingProcessRunner::new().fail_command("cmake ..", Some(1)));

        let err = pipeline(&fixture, &runner)
            .build(&mut Vec::new())
            .await
            .unwrap_err();

        assert_stage_failed(&err, "amber-vm");
        assert_commands_run(&runner, &["cargo build", "cmake .."]);
        assert_eq!(fixture.output_files(), vec![exe("amberc")]);
    }

    #[tokio::test]
    async fn test_spawn_failure_aborts_pipeline() {
        let fixture = ProjectFixture::new();
        let runner = Arc::new(RecordingProcessRunner::new().missing_program("cargo"));

        let err = pipeline(&fixture, &runner)
            .build(&mut Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DriverError::Spawn { ref program, .. } if program == "cargo"));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_subproject_dir_names_the_directory() {
        let fixture = ProjectFixture::new();
        std::fs::remove_dir_all(fixture.config().compiler_path()).unwrap();
        let runner = Arc::new(RecordingProcessRunner::new());

        let err = pipeline(&fixture, &runner)
            .build(&mut Vec::new())
            .await
            .unwrap_err();

        match &err {
            DriverError::MissingWorkingDir { path } => {
                assert_eq!(path, &fixture.config().compiler_path());
            }
            other => panic!("expected missing working dir, got {other:?}"),
        }
        assert!(err.fix_hint().unwrap().contains("AMBERLINK_ROOT"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_binary_after_success() {
        let fixture = ProjectFixture::new();
        let runner = Arc::new(RecordingProcessRunner::new());

        let err = pipeline(&fixture, &runner)
            .build(&mut Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DriverError::MissingArtifact { ref stage, .. } if stage == "amber-core"));
        assert_commands_run(&runner, &["cargo build"]);
    }

    #[tokio::test]
    async fn test_rebuild_overwrites_instead_of_accumulating() {
        let fixture = ProjectFixture::new();
        fixture.write_compiler_output(b"compiler v1");
        fixture.write_runtime_output(b"vm v1");
        let runner = Arc::new(RecordingProcessRunner::new());
        let pipeline = pipeline(&fixture, &runner);

        pipeline.build(&mut Vec::new()).await.unwrap();
        let first = fixture.output_files();
        pipeline.build(&mut Vec::new()).await.unwrap();

        assert_eq!(fixture.output_files(), first);
        assert_eq!(fixture.read_output(&exe("amberc")), b"compiler v1");

        fixture.write_compiler_output(b"compiler v2");
        pipeline.build(&mut Vec::new()).await.unwrap();

        assert_eq!(fixture.output_files(), first);
        assert_eq!(fixture.read_output(&exe("amberc")), b"compiler v2");
    }

    #[tokio::test]
    async fn test_runtime_build_dir_is_created() {
        let fixture = ProjectFixture::new();
        fixture.write_compiler_output(b"c");
        let build_dir = fixture.config().runtime_build_path();
        assert!(!build_dir.exists());
        let runner = Arc::new(RecordingProcessRunner::new().fail_command("cmake ..", Some(1)));

        let _ = pipeline(&fixture, &runner).build(&mut Vec::new()).await;

        assert!(build_dir.is_dir());
    }

    #[tokio::test]
    async fn test_lifecycle_events_on_success() {
        let fixture = ProjectFixture::new();
        fixture.write_compiler_output(b"c");
        fixture.write_runtime_output(b"v");
        let sink = Arc::new(CollectingEventSink::new());
        let runner = Arc::new(RecordingProcessRunner::new());

        pipeline(&fixture, &runner)
            .with_event_sink(sink.clone())
            .build(&mut Vec::new())
            .await
            .unwrap();

        assert_eq!(
            sink.event_names(),
            vec![
                "pipeline.started",
                "stage.started",
                "artifact.staged",
                "stage.completed",
                "stage.started",
                "artifact.staged",
                "stage.completed",
                "pipeline.completed",
            ]
        );
        let staged = sink.payloads(BuildEvent::ArtifactStaged);
        assert_eq!(staged[0].as_ref().unwrap()["name"], "amberc");
        assert_eq!(staged[1].as_ref().unwrap()["name"], "avm");
    }

    #[tokio::test]
    async fn test_lifecycle_events() {
        let fixture = ProjectFixture::new();
        fixture.write_compiler_output(b"c");
        let sink = Arc::new(CollectingEventSink::new());
        let runner = Arc::new(RecordingProcessRunner::new().fail_command("cmake --build .", Some(2)));

        let _ = pipeline(&fixture, &runner)
            .with_event_sink(sink.clone())
            .build(&mut Vec::new())
            .await;

        assert_eq!(
            sink.event_names(),
            vec![
                "pipeline.started",
                "stage.started",
                "artifact.staged",
                "stage.completed",
                "stage.started",
                "stage.failed",
            ]
        );
        let failed = sink.payloads(BuildEvent::StageFailed);
        let data = failed[0].as_ref().unwrap();
        assert_eq!(data["name"], "amber-vm");
        assert_eq!(data["status"], "fail");
    }
}
