//! Artifact staging.
//!
//! Copies the binaries produced by native build systems into the shared
//! output directory under their canonical names.

use crate::core::{BinaryDescriptor, StagedArtifact};
use crate::errors::{DriverError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copies built binaries into the output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStager {
    output_dir: PathBuf,
}

impl ArtifactStager {
    /// Creates a stager writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory cannot be created.
    pub fn ensure_output_dir(&self) -> Result<()> {
        ensure_dir(&self.output_dir)
    }

    /// Stages the binary described by `descriptor` for `stage_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::MissingArtifact`] if the binary was not
    /// produced, or an IO error if copying fails.
    pub fn stage_descriptor(
        &self,
        stage_name: &str,
        descriptor: &BinaryDescriptor,
    ) -> Result<StagedArtifact> {
        let source = descriptor.source_path();
        let path = stage(&source, &self.output_dir, &descriptor.destination_name())
            .map_err(|err| match err {
                DriverError::MissingArtifact { path, .. } => DriverError::MissingArtifact {
                    stage: stage_name.to_string(),
                    path,
                },
                other => other,
            })?;

        info!(
            stage = stage_name,
            source = %source.display(),
            destination = %path.display(),
            "Staged binary"
        );
        Ok(StagedArtifact::new(stage_name, &descriptor.canonical_name, path))
    }
}

/// Copies `source` to `destination_dir/destination_name`.
///
/// The destination directory is created if needed and any existing file
/// at the destination is overwritten.
///
/// # Errors
///
/// Returns [`DriverError::MissingArtifact`] if `source` is not a file, or
/// an IO error if the copy fails.
pub fn stage(source: &Path, destination_dir: &Path, destination_name: &str) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(DriverError::MissingArtifact {
            stage: String::new(),
            path: source.to_path_buf(),
        });
    }

    ensure_dir(destination_dir)?;
    let destination = destination_dir.join(destination_name);
    let bytes = fs::copy(source, &destination)?;
    debug!(
        source = %source.display(),
        destination = %destination.display(),
        bytes,
        "Copied artifact"
    );
    Ok(destination)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "Creating directory");
    }
    fs::create_dir_all(dir)?;
    Ok(())
}
