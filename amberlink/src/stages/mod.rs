//! Build stage definitions.
//!
//! A stage is one subproject's build: an ordered list of external commands
//! run in one working directory, followed by staging the binary they
//! produce.

mod result;

pub use result::StageResult;

use crate::core::BinaryDescriptor;
use crate::process::ExternalCommand;
use std::path::{Path, PathBuf};

/// One subproject's build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStage {
    name: String,
    working_dir: PathBuf,
    steps: Vec<ExternalCommand>,
    produced_binary: BinaryDescriptor,
    create_working_dir: bool,
}

impl BuildStage {
    /// Creates a stage with no steps.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        produced_binary: BinaryDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            working_dir: working_dir.into(),
            steps: Vec::new(),
            produced_binary,
            create_working_dir: false,
        }
    }

    /// Appends a step running `program` with `args` in the stage's
    /// working directory.
    #[must_use]
    pub fn step<I, S>(mut self, program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = ExternalCommand::new(program, &self.working_dir).args(args);
        self.steps.push(command);
        self
    }

    /// Creates the working directory before the first step runs.
    #[must_use]
    pub const fn creating_working_dir(mut self) -> Self {
        self.create_working_dir = true;
        self
    }

    /// Returns the stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the working directory.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[ExternalCommand] {
        &self.steps
    }

    /// Returns the binary this stage produces.
    #[must_use]
    pub const fn produced_binary(&self) -> &BinaryDescriptor {
        &self.produced_binary
    }

    /// Returns true if the working directory is created before running.
    #[must_use]
    pub const fn creates_working_dir(&self) -> bool {
        self.create_working_dir
    }
}
