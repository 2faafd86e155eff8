//! Command routing.
//!
//! Maps the first CLI argument to an action, runs it once and returns the
//! exit status for the process.

mod command;

pub use command::{Command, BUILD_USAGE};

use crate::config::DriverConfig;
use crate::errors::{DriverError, Result};
use crate::events::{EventSink, NoOpEventSink};
use crate::pipeline::{compiler_binary, BuildPipeline};
use crate::process::{ExternalCommand, ProcessRunner};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Top-level usage text.
pub const USAGE: &str = "\
Usage: amberlink <command>

Commands:
  init           Build the compiler and VM and stage them into bin/
  build <file>   Compile <file> with the staged compiler
  install        Install the toolchain (not implemented yet)
";

/// Dispatches parsed commands to the pipeline or the staged compiler.
pub struct Router {
    config: DriverConfig,
    profile_override: Option<String>,
    runner: Arc<dyn ProcessRunner>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("profile_override", &self.profile_override)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Creates a router for the project described by `config`.
    #[must_use]
    pub fn new(config: DriverConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            config,
            profile_override: None,
            runner,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets a Cargo profile name to apply when building the toolchain.
    ///
    /// The value is only validated by commands that build, so a bad
    /// override never breaks `help`, `install` or `build <file>`.
    #[must_use]
    pub fn with_profile_override(mut self, profile: Option<String>) -> Self {
        self.profile_override = profile;
        self
    }

    /// Sets the event sink handed to the build pipeline.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs the command named by `args` (program name excluded) and
    /// returns the process exit status.
    ///
    /// Usage mistakes and a missing toolchain are reported on `out` and
    /// exit with status 0.
    ///
    /// # Errors
    ///
    /// Returns fatal failures: a failed build stage, a program that could
    /// not be started, or an IO error.
    pub async fn dispatch<S: AsRef<str>>(&self, args: &[S], out: &mut dyn Write) -> Result<i32> {
        match self.route(args, out).await {
            Err(err) if err.is_user_facing() => {
                debug!(error = %err, "Reporting user error");
                writeln!(out, "{err}")?;
                if let Some(hint) = err.fix_hint() {
                    writeln!(out, "{hint}")?;
                }
                Ok(err.exit_code())
            }
            other => other,
        }
    }

    async fn route<S: AsRef<str>>(&self, args: &[S], out: &mut dyn Write) -> Result<i32> {
        let command = Command::parse(args)?;
        info!(?command, "Dispatching command");

        match command {
            Command::Usage => {
                write!(out, "{USAGE}")?;
                Ok(0)
            }
            Command::BuildToolchain => {
                let config = self
                    .config
                    .clone()
                    .apply_profile_override(self.profile_override.as_deref())?;
                BuildPipeline::for_toolchain(&config, self.runner.clone())
                    .with_event_sink(self.sink.clone())
                    .build(out)
                    .await?;
                Ok(0)
            }
            Command::CompileFile(file) => self.compile_file(&file).await,
            Command::Install => {
                writeln!(out, "install: not implemented yet")?;
                Ok(0)
            }
            Command::Unknown(token) => {
                writeln!(out, "Unknown command: {token}")?;
                Ok(0)
            }
        }
    }

    async fn compile_file(&self, file: &Path) -> Result<i32> {
        let compiler = compiler_binary(&self.config).staged_path(&self.config.output_path());
        if !compiler.is_file() {
            return Err(DriverError::MissingPrerequisite { path: compiler });
        }

        let command = ExternalCommand::new(
            compiler.to_string_lossy(),
            std::env::current_dir()?,
        )
        .arg(file.to_string_lossy());
        let outcome = self.runner.run(&command).await?;
        info!(
            file = %file.display(),
            exit_code = ?outcome.exit_code,
            "Compiler finished"
        );
        Ok(outcome.propagated_code())
    }
}
