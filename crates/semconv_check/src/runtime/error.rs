//! Fatal errors for a check run.
//!
//! A [`CheckError`] aborts the run and becomes the single `error: ...` line before exit code 1.
//! Metrics that merely cannot be verified never become errors.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// What kind of failure stopped the run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckErrorCategory {
    /// Bad registry file or a YAML document that does not parse.
    Config,
    /// Project root unusable, or `git` not installed.
    Environment,
    /// `git` could not be spawned.
    ProcessLaunch,
    /// `git clone` exited non-zero.
    ProcessExit,
    /// Bad command-line input, or description mismatches were found.
    Validation,
    /// Filesystem failure while reading sources or writing the report.
    Io,
}

/// Fatal error plus the context accumulated while it propagated.
///
/// Rendered as `message [operation: ..] [target: ..] [hint: ..]`, omitting absent parts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckError {
    pub category: CheckErrorCategory,
    pub message: String,
    /// Step that failed, such as `fetch semantic-conventions`.
    pub operation: Option<String>,
    /// File or directory involved, such as the mismatch report.
    pub target: Option<String>,
    /// What the user can do about it.
    pub hint: Option<String>,
}

/// Result alias used throughout the crate.
pub type CheckResult<T> = Result<T, CheckError>;

impl CheckError {
    pub fn new(category: CheckErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::Config, message)
    }

    pub fn environment(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::Environment, message)
    }

    pub fn process_launch(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::ProcessLaunch, message)
    }

    pub fn process_exit(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::ProcessExit, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::Validation, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(CheckErrorCategory::Io, message)
    }

    /// Label the failing step.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Record the path involved.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Suggest a remedy.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for CheckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        let context = [
            ("operation", &self.operation),
            ("target", &self.target),
            ("hint", &self.hint),
        ];
        for (label, value) in context {
            if let Some(value) = value {
                write!(f, " [{label}: {value}]")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for CheckError {}

impl From<std::io::Error> for CheckError {
    fn from(value: std::io::Error) -> Self {
        CheckError::io(value.to_string())
    }
}
