//! Registry of produced build artifacts

use std::path::{Path, PathBuf};

/// Command identifier every archive is registered under
pub const COMMAND_NAME: &str = "bdist_venv";

/// One produced output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub command: String,
    pub python_version: String,
    pub path: PathBuf,
}

/// Outputs produced during one invocation, in registration order
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    artifacts: Vec<Artifact>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: &str, python_version: &str, path: &Path) {
        self.artifacts.push(Artifact {
            command: command.to_string(),
            python_version: python_version.to_string(),
            path: path.to_path_buf(),
        });
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
