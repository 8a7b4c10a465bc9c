//! Shared process execution helpers.

use crate::runtime::env::EnvHelper;
use crate::runtime::error::{CheckError, CheckResult};
use std::path::Path;
use std::process::{Command, Stdio};

/// Shared process runner used by the checker.
///
/// This type centralizes how external programs are invoked:
/// - print commands in a stable `+ ...` format
/// - run from a caller-provided working directory
/// - normalize error categorization into [`CheckError`]
/// - provide lightweight availability probes for prerequisite checks
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner {
    env: EnvHelper,
}

impl ProcessRunner {
    /// Create a process runner.
    pub fn new() -> Self {
        Self { env: EnvHelper }
    }

    /// Return whether the given program is available by checking `--version`.
    ///
    /// Probe failures are treated as `false` instead of surfacing an error.
    pub fn command_available(&self, program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Require a command to exist.
    ///
    /// Returns an environment error with the supplied hint when the command is unavailable.
    pub fn ensure_command(&self, program: &str, hint: &str) -> CheckResult<()> {
        if self.command_available(program) {
            Ok(())
        } else {
            Err(CheckError::environment(format!(
                "required command `{program}` not found. {hint}"
            )))
        }
    }

    /// Run a process with owned string arguments.
    ///
    /// The process inherits the terminal stdio streams. Non-zero exits are converted into
    /// [`CheckError::process_exit`].
    pub fn run_owned(&self, cwd: &Path, program: &str, args: Vec<String>) -> CheckResult<()> {
        self.print_command(program, &args);
        let mut cmd = Command::new(program);
        cmd.current_dir(cwd).args(&args);
        if program == "git" {
            self.env.apply_git_noninteractive(&mut cmd);
        }
        let status = cmd.status().map_err(|err| {
            CheckError::process_launch(format!("failed to start `{program}`: {err}"))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(CheckError::process_exit(format!(
                "`{program}` exited with status {status}"
            )))
        }
    }

    /// Print a process invocation in a stable format.
    pub fn print_command(&self, program: &str, args: &[String]) {
        if args.is_empty() {
            println!("+ {program}");
        } else {
            println!("+ {program} {}", args.join(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_available_reports_missing_binary() {
        let runner = ProcessRunner::new();
        assert!(!runner.command_available("definitely-not-a-real-command-binary"));
    }

    #[test]
    fn ensure_command_reports_environment_error_with_hint() {
        let runner = ProcessRunner::new();
        let err = runner
            .ensure_command("definitely-not-a-real-command-binary", "install it")
            .expect_err("missing command should fail");
        assert_eq!(
            err.category,
            crate::runtime::error::CheckErrorCategory::Environment
        );
        assert!(err.message.contains("install it"));
    }

    #[test]
    fn run_owned_reports_launch_failure_for_missing_binary() {
        let runner = ProcessRunner::new();
        let err = runner
            .run_owned(
                &std::env::temp_dir(),
                "definitely-not-a-real-command-binary",
                Vec::new(),
            )
            .expect_err("missing binary should fail to launch");
        assert_eq!(
            err.category,
            crate::runtime::error::CheckErrorCategory::ProcessLaunch
        );
    }
}
