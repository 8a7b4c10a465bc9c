//! Artifact path management for checker runs.

use crate::runtime::error::{CheckError, CheckResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Default cache location, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".artifacts/semconv-cache";
/// Directory name of the cloned dataset inside the cache directory.
pub const DATASET_DIR_NAME: &str = "semantic-conventions";
const MISMATCH_REPORT: &str = "mismatches.txt";
const RUNS_DIR: &str = "runs";

/// Central artifact path policy.
///
/// Everything the checker writes lives under one cache directory: the cloned dataset, the
/// mismatch report inside it, and per-run workflow logs. Callers should use this type instead of
/// joining paths by hand.
#[derive(Clone, Debug)]
pub struct ArtifactManager {
    root: PathBuf,
    cache_dir: PathBuf,
}

impl ArtifactManager {
    /// Create an artifact manager using the default cache location under `root`.
    pub fn new(root: PathBuf) -> Self {
        let cache_dir = root.join(DEFAULT_CACHE_DIR);
        Self { root, cache_dir }
    }

    /// Create an artifact manager with an explicit cache directory.
    ///
    /// Relative cache paths are anchored to `root`.
    pub fn with_cache_dir(root: PathBuf, cache_dir: &Path) -> Self {
        let cache_dir = if cache_dir.is_absolute() {
            cache_dir.to_path_buf()
        } else {
            root.join(cache_dir)
        };
        Self { root, cache_dir }
    }

    /// Return the project root path used for resolution.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a possibly-relative project path.
    ///
    /// Absolute paths are preserved, while relative paths are anchored to the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Cache directory holding the dataset and run logs.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Location of the cloned specification dataset.
    pub fn dataset_dir(&self) -> PathBuf {
        self.cache_dir.join(DATASET_DIR_NAME)
    }

    /// Location of the mismatch report, written only when a run fails.
    pub fn mismatch_report(&self) -> PathBuf {
        self.dataset_dir().join(MISMATCH_REPORT)
    }

    /// Return the run-log root used by [`WorkflowRecorder`](crate::runtime::workflow::WorkflowRecorder).
    pub fn runs_dir(&self) -> PathBuf {
        self.cache_dir.join(RUNS_DIR)
    }

    /// Ensure a directory exists.
    ///
    /// This helper is idempotent and succeeds when the directory already exists.
    pub fn ensure_dir(&self, path: &Path) -> CheckResult<()> {
        fs::create_dir_all(path)
            .map_err(|err| CheckError::io(format!("failed to create {}: {err}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unique_temp_root;


    #[test]
    fn default_paths_live_under_project_cache() {
        let root = PathBuf::from("/tmp/semconv-artifacts-root");
        let manager = ArtifactManager::new(root.clone());
        assert_eq!(manager.cache_dir(), root.join(".artifacts/semconv-cache"));
        assert_eq!(
            manager.dataset_dir(),
            root.join(".artifacts/semconv-cache/semantic-conventions")
        );
        assert_eq!(
            manager.mismatch_report(),
            root.join(".artifacts/semconv-cache/semantic-conventions/mismatches.txt")
        );
        assert_eq!(manager.runs_dir(), root.join(".artifacts/semconv-cache/runs"));
    }

    #[test]
    fn explicit_cache_dir_is_anchored_to_root_when_relative() {
        let root = PathBuf::from("/tmp/semconv-artifacts-root");
        let relative = ArtifactManager::with_cache_dir(root.clone(), Path::new("build/cache"));
        assert_eq!(relative.cache_dir(), root.join("build/cache"));

        let absolute = ArtifactManager::with_cache_dir(root, Path::new("/var/cache/semconv"));
        assert_eq!(absolute.cache_dir(), Path::new("/var/cache/semconv"));
    }

    #[test]
    fn ensure_dir_creates_missing_directory() {
        let root = unique_temp_root("semconv_artifacts");
        let manager = ArtifactManager::new(root.clone());
        let target = root.join("nested/output");
        manager.ensure_dir(&target).expect("ensure dir");
        assert!(target.is_dir());
        let _ = fs::remove_dir_all(root);
    }
}
