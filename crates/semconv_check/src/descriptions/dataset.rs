//! Local copy of the semantic-conventions repository.

use crate::runtime::artifacts::DATASET_DIR_NAME;
use crate::runtime::error::{CheckError, CheckResult};
use crate::runtime::process::ProcessRunner;
use std::path::{Path, PathBuf};

pub const DEFAULT_REPO_URL: &str = "https://github.com/open-telemetry/semantic-conventions.git";
pub const DEFAULT_BRANCH: &str = "main";

/// Materializes the specification dataset at a destination directory.
pub trait DatasetFetcher {
    /// Fetch into `destination`, which does not exist yet.
    fn fetch(&self, destination: &Path) -> CheckResult<()>;
}

/// Shallow, single-branch `git clone` of the specification repository.
#[derive(Clone, Debug)]
pub struct GitDatasetFetcher {
    process: ProcessRunner,
    repo_url: String,
    branch: String,
}

impl GitDatasetFetcher {
    pub fn with_source(
        process: ProcessRunner,
        repo_url: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            process,
            repo_url: repo_url.into(),
            branch: branch.into(),
        }
    }

    fn clone_args(&self, destination: &Path) -> Vec<String> {
        vec![
            "clone".into(),
            "--depth".into(),
            "1".into(),
            "--single-branch".into(),
            "--branch".into(),
            self.branch.clone(),
            self.repo_url.clone(),
            destination.display().to_string(),
        ]
    }
}

impl DatasetFetcher for GitDatasetFetcher {
    fn fetch(&self, destination: &Path) -> CheckResult<()> {
        self.process.ensure_command(
            "git",
            "Install git to fetch the semantic-conventions repository.",
        )?;
        let parent = destination.parent().ok_or_else(|| {
            CheckError::validation("dataset destination has no parent directory")
                .with_path(destination)
        })?;
        self.process
            .run_owned(parent, "git", self.clone_args(destination))
            .map_err(|err| {
                err.with_operation("fetch semantic-conventions")
                    .with_path(destination)
                    .with_hint(format!("check access to {}", self.repo_url))
            })
    }
}

/// Return the dataset path under `cache_dir`, fetching it first when absent.
///
/// An existing dataset directory is reused as-is, so repeated calls fetch at most once. Fetch
/// failures propagate unchanged; there is no retry.
pub fn ensure_spec_dataset(
    cache_dir: &Path,
    fetcher: &dyn DatasetFetcher,
) -> CheckResult<PathBuf> {
    let dataset = cache_dir.join(DATASET_DIR_NAME);
    if dataset.exists() {
        return Ok(dataset);
    }

    std::fs::create_dir_all(cache_dir).map_err(|err| {
        CheckError::io(format!("failed to create {}: {err}", cache_dir.display()))
    })?;
    fetcher.fetch(&dataset)?;
    Ok(dataset)
}
