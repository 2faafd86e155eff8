//! # Amberlink
//!
//! Build driver for the Amber toolchain.
//!
//! Amberlink builds the two Amber subprojects in a fixed order and stages
//! their binaries into a single output directory:
//!
//! - **amber-core**: the compiler, built with `cargo build`, staged as `bin/amberc`
//! - **amber-vm**: the virtual machine, built with CMake, staged as `bin/avm`
//!
//! It also compiles single source files with the staged compiler.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use amberlink::prelude::*;
//!
//! let config = DriverConfig::from_env()?;
//! let router = Router::new(config, Arc::new(SystemProcessRunner::new()));
//!
//! let code = router.dispatch(&["init"], &mut std::io::stdout()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod process;
pub mod router;
pub mod stages;
pub mod staging;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{CargoProfile, DriverConfig};
    pub use crate::core::{BinaryDescriptor, StageOutcome, StageStatus, StagedArtifact};
    pub use crate::errors::DriverError;
    pub use crate::events::{BuildEvent, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{BuildPipeline, PipelineReport};
    pub use crate::process::{ExternalCommand, ProcessRunner, SystemProcessRunner};
    pub use crate::router::{Command, Router, USAGE};
    pub use crate::stages::{BuildStage, StageResult};
    pub use crate::staging::ArtifactStager;
}
