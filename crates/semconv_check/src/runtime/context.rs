//! Shared command context passed into command families.

use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::process::ProcessRunner;
use crate::runtime::workflow::WorkflowRecorder;
use std::path::{Path, PathBuf};

/// Shared execution context for command families.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    artifacts: ArtifactManager,
    process: ProcessRunner,
    workflow: WorkflowRecorder,
}

impl CommandContext {
    /// Create a context from an explicit artifact layout.
    pub fn with_artifacts(artifacts: ArtifactManager) -> Self {
        let root = artifacts.root().to_path_buf();
        let workflow = WorkflowRecorder::new(artifacts.clone());
        Self {
            root,
            artifacts,
            process: ProcessRunner::new(),
            workflow,
        }
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared artifact manager.
    pub fn artifacts(&self) -> &ArtifactManager {
        &self.artifacts
    }

    /// Shared process runner.
    pub fn process(&self) -> &ProcessRunner {
        &self.process
    }

    /// Shared workflow recorder.
    pub fn workflow(&self) -> &WorkflowRecorder {
        &self.workflow
    }
}
