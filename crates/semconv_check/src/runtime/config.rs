//! TOML file loading for registry overrides.

use crate::runtime::error::{CheckError, CheckResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Reads one root-relative TOML file into `T`.
///
/// Shape checks beyond what serde enforces (empty lists, duplicate names) belong to the caller.
///
/// ```rust
/// # use serde::Deserialize;
/// # use std::path::Path;
/// # use semconv_check::runtime::config::ConfigLoader;
/// #[derive(Deserialize)]
/// struct MetricFile {
///     metric: Vec<toml::Table>,
/// }
///
/// let loader = ConfigLoader::<MetricFile>::new(Path::new("/repo"), "ci/metrics.toml");
/// assert_eq!(loader.path(), Path::new("/repo/ci/metrics.toml"));
/// ```
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// `relative_path` is joined onto `root`; an absolute path replaces it.
    pub fn new(root: &Path, relative_path: impl AsRef<Path>) -> Self {
        Self {
            path: root.join(relative_path),
            _marker: PhantomData,
        }
    }

    /// Read and deserialize the file. Any failure is a
    /// [`CheckErrorCategory::Config`](crate::runtime::error::CheckErrorCategory::Config) error.
    pub fn load(&self) -> CheckResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            CheckError::config(format!("cannot read config: {err}")).with_path(&self.path)
        })?;
        toml::from_str(&body).map_err(|err| {
            CheckError::config(format!("invalid TOML: {err}")).with_path(&self.path)
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
