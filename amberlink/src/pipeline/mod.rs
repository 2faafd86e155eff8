//! Toolchain build pipeline.
//!
//! This module provides:
//! - The fixed toolchain stage definitions
//! - The sequential pipeline executor
//! - The report returned by a successful run

mod executor;
#[cfg(test)]
mod integration_tests;
mod report;
mod spec;

pub use executor::BuildPipeline;
pub use report::PipelineReport;
pub use spec::{
    compiler_binary, compiler_stage, runtime_binary, runtime_stage, toolchain_stages,
    COMPILER_CANONICAL_NAME, COMPILER_STAGE, RUNTIME_CANONICAL_NAME, RUNTIME_STAGE,
};
