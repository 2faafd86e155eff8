//! Driver configuration.
//!
//! The driver has no config file. Everything is derived from the project
//! root, with a couple of environment overrides read once at startup.

use crate::errors::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding the project root.
pub const ROOT_ENV: &str = "AMBERLINK_ROOT";

/// Environment variable selecting the Cargo profile for the compiler.
pub const PROFILE_ENV: &str = "AMBERLINK_PROFILE";

/// Cargo profile used to build the compiler subproject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CargoProfile {
    /// `cargo build`, output in `target/debug`.
    #[default]
    Debug,
    /// `cargo build --release`, output in `target/release`.
    Release,
}

impl CargoProfile {
    /// Returns the name of the directory under `target/` holding the output.
    #[must_use]
    pub const fn target_dir(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    /// Parses a profile name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown profile names.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" | "dev" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(DriverError::config(format!(
                "unknown cargo profile '{other}' (expected 'debug' or 'release')"
            ))),
        }
    }
}

impl fmt::Display for CargoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target_dir())
    }
}

/// Locations and options for a toolchain build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// The project root containing both subprojects.
    pub root: PathBuf,
    /// Name of the shared output directory under the root.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Directory name of the compiler subproject.
    #[serde(default = "default_compiler_dir")]
    pub compiler_dir: String,
    /// Directory name of the VM subproject.
    #[serde(default = "default_runtime_dir")]
    pub runtime_dir: String,
    /// Cargo profile for the compiler build.
    #[serde(default)]
    pub profile: CargoProfile,
}

fn default_output_dir() -> String {
    "bin".to_string()
}

fn default_compiler_dir() -> String {
    "amber-core".to_string()
}

fn default_runtime_dir() -> String {
    "amber-vm".to_string()
}

impl DriverConfig {
    /// Creates a configuration rooted at `root` with default layout.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: default_output_dir(),
            compiler_dir: default_compiler_dir(),
            runtime_dir: default_runtime_dir(),
            profile: CargoProfile::default(),
        }
    }

    /// Builds the configuration from the process environment.
    ///
    /// Only the root is read here; it defaults to the current directory.
    /// The profile override is read separately with
    /// [`profile_override_from_env`](Self::profile_override_from_env) so
    /// commands that never build anything do not depend on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read.
    pub fn from_env() -> Result<Self> {
        let root = match std::env::var_os(ROOT_ENV) {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => std::env::current_dir()?,
        };
        Ok(Self::new(root))
    }

    /// Returns the raw `AMBERLINK_PROFILE` value, if set.
    #[must_use]
    pub fn profile_override_from_env() -> Option<String> {
        std::env::var(PROFILE_ENV).ok()
    }

    /// Applies a profile override. Blank values keep the current profile.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `value` is not a known profile.
    pub fn apply_profile_override(mut self, value: Option<&str>) -> Result<Self> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.profile = CargoProfile::parse(value)?;
        }
        Ok(self)
    }

    /// Sets the Cargo profile.
    #[must_use]
    pub const fn with_profile(mut self, profile: CargoProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Returns the project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the shared output directory (`<root>/bin`).
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    /// Returns the compiler subproject directory.
    #[must_use]
    pub fn compiler_path(&self) -> PathBuf {
        self.root.join(&self.compiler_dir)
    }

    /// Returns the VM subproject directory.
    #[must_use]
    pub fn runtime_path(&self) -> PathBuf {
        self.root.join(&self.runtime_dir)
    }

    /// Returns the VM's out-of-source build directory.
    #[must_use]
    pub fn runtime_build_path(&self) -> PathBuf {
        self.runtime_path().join("build")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_layout() {
        let config = DriverConfig::new("/work/amber");

        assert_eq!(config.output_path(), PathBuf::from("/work/amber/bin"));
        assert_eq!(config.compiler_path(), PathBuf::from("/work/amber/amber-core"));
        assert_eq!(
            config.runtime_build_path(),
            PathBuf::from("/work/amber/amber-vm/build")
        );
        assert_eq!(config.profile, CargoProfile::Debug);
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(CargoProfile::parse("Release").unwrap(), CargoProfile::Release);
        assert_eq!(CargoProfile::parse(" debug ").unwrap(), CargoProfile::Debug);
        assert!(CargoProfile::parse("fast").is_err());
    }

    #[test]
    fn test_profile_override() {
        let config = DriverConfig::new("/r")
            .apply_profile_override(Some("release"))
            .unwrap();
        assert_eq!(config.profile, CargoProfile::Release);

        let config = DriverConfig::new("/r").apply_profile_override(Some("")).unwrap();
        assert_eq!(config.profile, CargoProfile::Debug);

        assert!(DriverConfig::new("/r")
            .apply_profile_override(Some("nightly"))
            .is_err());
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: DriverConfig = serde_json::from_str(r#"{"root": "/r"}"#).unwrap();
        assert_eq!(config, DriverConfig::new("/r"));
    }
}
