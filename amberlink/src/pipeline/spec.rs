//! The fixed toolchain stage definitions.
//!
//! Order matters only for readable output and unambiguous failure
//! attribution: the compiler is built first, then the VM.

use crate::config::{CargoProfile, DriverConfig};
use crate::core::BinaryDescriptor;
use crate::stages::BuildStage;

/// Stage name of the compiler build.
pub const COMPILER_STAGE: &str = "amber-core";

/// Stage name of the VM build.
pub const RUNTIME_STAGE: &str = "amber-vm";

/// Canonical name of the staged compiler.
pub const COMPILER_CANONICAL_NAME: &str = "amberc";

/// Canonical name of the staged VM.
pub const RUNTIME_CANONICAL_NAME: &str = "avm";

/// Describes the compiler binary produced by `cargo build`.
#[must_use]
pub fn compiler_binary(config: &DriverConfig) -> BinaryDescriptor {
    let target_dir = config
        .compiler_path()
        .join("target")
        .join(config.profile.target_dir());
    BinaryDescriptor::new(COMPILER_STAGE, target_dir, COMPILER_CANONICAL_NAME)
}

/// Describes the VM binary produced by the CMake build.
#[must_use]
pub fn runtime_binary(config: &DriverConfig) -> BinaryDescriptor {
    BinaryDescriptor::new("avm", config.runtime_build_path(), RUNTIME_CANONICAL_NAME)
}

/// Builds the compiler stage: `cargo build` inside the compiler subproject.
#[must_use]
pub fn compiler_stage(config: &DriverConfig) -> BuildStage {
    let mut args = vec!["build"];
    if config.profile == CargoProfile::Release {
        args.push("--release");
    }
    BuildStage::new(COMPILER_STAGE, config.compiler_path(), compiler_binary(config))
        .step("cargo", args)
}

/// Builds the VM stage: configure and build with CMake in `build/`.
#[must_use]
pub fn runtime_stage(config: &DriverConfig) -> BuildStage {
    BuildStage::new(
        RUNTIME_STAGE,
        config.runtime_build_path(),
        runtime_binary(config),
    )
    .step("cmake", [".."])
    .step("cmake", ["--build", "."])
    .creating_working_dir()
}

/// Returns the toolchain stages in execution order.
#[must_use]
pub fn toolchain_stages(config: &DriverConfig) -> Vec<BuildStage> {
    vec![compiler_stage(config), runtime_stage(config)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_toolchain_order() {
        let stages = toolchain_stages(&DriverConfig::new("/p"));

        let names: Vec<_> = stages.iter().map(BuildStage::name).collect();
        assert_eq!(names, vec![COMPILER_STAGE, RUNTIME_STAGE]);
    }

    #[test]
    fn test_compiler_stage_debug() {
        let stage = compiler_stage(&DriverConfig::new("/p"));

        assert_eq!(stage.working_dir(), PathBuf::from("/p/amber-core"));
        assert_eq!(stage.steps()[0].command_line(), "cargo build");
        assert_eq!(
            stage.produced_binary().source_dir,
            PathBuf::from("/p/amber-core/target/debug")
        );
        assert_eq!(stage.produced_binary().canonical_name, "amberc");
        assert!(!stage.creates_working_dir());
    }

    #[test]
    fn test_compiler_stage_release() {
        let config = DriverConfig::new("/p").with_profile(CargoProfile::Release);
        let stage = compiler_stage(&config);

        assert_eq!(stage.steps()[0].command_line(), "cargo build --release");
        assert_eq!(
            stage.produced_binary().source_dir,
            PathBuf::from("/p/amber-core/target/release")
        );
    }

    #[test]
    fn test_runtime_stage() {
        let stage = runtime_stage(&DriverConfig::new("/p"));

        let lines: Vec<_> = stage.steps().iter().map(|s| s.command_line()).collect();
        assert_eq!(lines, vec!["cmake ..", "cmake --build ."]);
        assert_eq!(stage.working_dir(), PathBuf::from("/p/amber-vm/build"));
        assert_eq!(stage.produced_binary().canonical_name, "avm");
        assert!(stage.creates_working_dir());
    }
}
