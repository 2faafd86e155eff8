//! Binary descriptors and staged artifacts.
//!
//! Native build systems name their outputs differently per OS. A
//! [`BinaryDescriptor`] is the only place that knows about it: callers ask
//! it for the source path and the destination name and never check the
//! host OS themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The executable suffix of the host platform (`".exe"` on Windows).
pub const HOST_EXE_SUFFIX: &str = std::env::consts::EXE_SUFFIX;

/// Appends an executable suffix to a binary stem.
#[must_use]
pub fn executable_name(stem: &str, suffix: &str) -> String {
    format!("{stem}{suffix}")
}

/// Describes the binary a build stage produces and where it must end up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryDescriptor {
    /// The stem the native build system gives the binary.
    pub stem: String,
    /// The directory the native build system writes the binary into.
    pub source_dir: PathBuf,
    /// The OS-independent name the binary is staged under.
    pub canonical_name: String,
}

impl BinaryDescriptor {
    /// Creates a new binary descriptor.
    #[must_use]
    pub fn new(
        stem: impl Into<String>,
        source_dir: impl Into<PathBuf>,
        canonical_name: impl Into<String>,
    ) -> Self {
        Self {
            stem: stem.into(),
            source_dir: source_dir.into(),
            canonical_name: canonical_name.into(),
        }
    }

    /// Returns the source path for a platform with the given suffix.
    #[must_use]
    pub fn source_path_with_suffix(&self, suffix: &str) -> PathBuf {
        self.source_dir.join(executable_name(&self.stem, suffix))
    }

    /// Returns the destination file name for a platform with the given suffix.
    #[must_use]
    pub fn destination_name_with_suffix(&self, suffix: &str) -> String {
        executable_name(&self.canonical_name, suffix)
    }

    /// Returns the path of the freshly built binary on this host.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        self.source_path_with_suffix(HOST_EXE_SUFFIX)
    }

    /// Returns the staged file name on this host.
    #[must_use]
    pub fn destination_name(&self) -> String {
        self.destination_name_with_suffix(HOST_EXE_SUFFIX)
    }

    /// Returns where the binary lives once staged into `output_dir`.
    #[must_use]
    pub fn staged_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.destination_name())
    }
}

/// A binary that has been copied into the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedArtifact {
    /// The stage that produced the binary.
    pub stage: String,
    /// The canonical name of the binary.
    pub canonical_name: String,
    /// The staged location.
    pub path: PathBuf,
    /// When the binary was staged.
    pub staged_at: DateTime<Utc>,
}

impl StagedArtifact {
    /// Creates a new staged artifact record.
    #[must_use]
    pub fn new(
        stage: impl Into<String>,
        canonical_name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stage: stage.into(),
            canonical_name: canonical_name.into(),
            path: path.into(),
            staged_at: Utc::now(),
        }
    }
}
