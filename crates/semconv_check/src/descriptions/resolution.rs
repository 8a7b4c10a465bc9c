use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// Outcome of resolving one side of a description comparison.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    Found(String),
    Unresolved(Unresolved),
}

impl Resolution {
    /// Collapse into the optional form used by the public lookup operations.
    pub fn into_option(self) -> Option<String> {
        match self {
            Resolution::Found(value) => Some(value),
            Resolution::Unresolved(_) => None,
        }
    }
}

/// Why a description could not be resolved. Always reported as a warning, never a mismatch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Unresolved {
    SourceFileMissing(PathBuf),
    SourceUnreadable { path: PathBuf, error: String },
    BuilderCallNotFound(PathBuf),
    DescriptionCallNotFound(PathBuf),
    SpecFileMissing(PathBuf),
    SpecGroupsMissing(PathBuf),
    SpecGroupNotFound { path: PathBuf, entry_id: String },
    BriefMissing { path: PathBuf, entry_id: String },
}

impl Display for Unresolved {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::SourceFileMissing(path) => {
                write!(f, "source file {} does not exist", path.display())
            }
            Unresolved::SourceUnreadable { path, error } => {
                write!(f, "failed to read {}: {error}", path.display())
            }
            Unresolved::BuilderCallNotFound(path) => {
                write!(f, "no instrument builder call found in {}", path.display())
            }
            Unresolved::DescriptionCallNotFound(path) => write!(
                f,
                "no single-line setDescription literal after the builder call in {}",
                path.display()
            ),
            Unresolved::SpecFileMissing(path) => {
                write!(f, "spec file {} does not exist", path.display())
            }
            Unresolved::SpecGroupsMissing(path) => {
                write!(f, "spec file {} has no `groups`", path.display())
            }
            Unresolved::SpecGroupNotFound { path, entry_id } => {
                write!(f, "no group `{entry_id}` in {}", path.display())
            }
            Unresolved::BriefMissing { path, entry_id } => {
                write!(f, "group `{entry_id}` in {} has no `brief`", path.display())
            }
        }
    }
}
