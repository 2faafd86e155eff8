//! Temporary project layouts for tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::DriverConfig;
use crate::pipeline::{compiler_binary, runtime_binary};

/// A throwaway project root with the two subproject directories.
///
/// The fake runner does not build anything, so tests drop the binaries a
/// real build would have produced with [`Self::write_compiler_output`] and
/// [`Self::write_runtime_output`].
pub struct ProjectFixture {
    _dir: TempDir,
    config: DriverConfig,
}

impl ProjectFixture {
    /// Creates an empty project with `amber-core/` and `amber-vm/`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = DriverConfig::new(dir.path());
        fs::create_dir_all(config.compiler_path()).unwrap();
        fs::create_dir_all(config.runtime_path()).unwrap();
        Self { _dir: dir, config }
    }

    /// Returns the configuration for this project.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Writes the binary `cargo build` would have produced.
    pub fn write_compiler_output(&self, bytes: &[u8]) -> PathBuf {
        write_file(&compiler_binary(&self.config).source_path(), bytes)
    }

    /// Writes the binary the CMake build would have produced.
    pub fn write_runtime_output(&self, bytes: &[u8]) -> PathBuf {
        write_file(&runtime_binary(&self.config).source_path(), bytes)
    }

    /// Stages a compiler directly into the output directory.
    pub fn write_staged_compiler(&self) -> PathBuf {
        let path = compiler_binary(&self.config).staged_path(&self.config.output_path());
        write_file(&path, b"amberc")
    }

    /// Returns the sorted file names in the output directory.
    pub fn output_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.config.output_path()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Reads a file from the output directory.
    pub fn read_output(&self, name: &str) -> Vec<u8> {
        fs::read(self.config.output_path().join(name)).unwrap()
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}
