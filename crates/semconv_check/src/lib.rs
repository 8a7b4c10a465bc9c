//! Metric description consistency checks for CI (`check-metric-descriptions`).
//!
//! The crate is a small CLI layer over a shared runtime. [`descriptions`] owns the comparison
//! policy (registry, source extraction, spec lookup, reporting) while [`runtime`] owns process
//! execution, artifact paths, configuration loading, and run recording.

pub mod cli;
pub mod commands;
pub mod descriptions;
pub mod runtime;

#[cfg(test)]
mod test_support;

use crate::cli::{GlobalOptions, TopLevelCommand};
use crate::commands::check::CheckCommand;
use crate::commands::registry::RegistryCommand;
use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{CheckError, CheckResult};

/// Shared contract for top-level command families.
///
/// [`CliCommand::parse`] is a pure translation from raw arguments into typed options; side
/// effects belong in [`CliCommand::run`], which should go through the services on
/// [`CommandContext`] rather than constructing its own.
pub trait CliCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    ///
    /// Invalid argument shapes are reported as
    /// [`CheckError::validation`](crate::runtime::error::CheckError::validation).
    fn parse(args: &[String]) -> CheckResult<Self::Options>;

    /// Execute the command family using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> CheckResult<()>;
}

/// Executes the binary using the current process arguments.
pub fn execute_from_env() -> CheckResult<()> {
    let parsed = cli::parse(std::env::args().skip(1).collect())?;
    if parsed.command == TopLevelCommand::Help {
        cli::print_usage();
        return Ok(());
    }
    let ctx = context_for(&parsed.global)?;

    match parsed.command {
        TopLevelCommand::Check(args) => CheckCommand::run(&ctx, CheckCommand::parse(&args)?),
        TopLevelCommand::Registry(args) => {
            RegistryCommand::run(&ctx, RegistryCommand::parse(&args)?)
        }
        TopLevelCommand::Help => Ok(()),
    }
}

/// Build the command context from global options.
pub fn context_for(global: &GlobalOptions) -> CheckResult<CommandContext> {
    let cwd = std::env::current_dir().map_err(|err| {
        CheckError::environment(format!("failed to resolve current directory: {err}"))
    })?;
    let root = match &global.root {
        Some(root) => cwd.join(root),
        None => cwd,
    };
    if !root.is_dir() {
        return Err(CheckError::environment("project root is not a directory").with_path(&root));
    }
    let artifacts = match &global.cache_dir {
        Some(cache_dir) => ArtifactManager::with_cache_dir(root, cache_dir),
        None => ArtifactManager::new(root),
    };
    Ok(CommandContext::with_artifacts(artifacts))
}

/// Converts a command result into a stable process exit code.
///
/// Mismatches and fatal errors both map to exit code `1` after printing the formatted
/// [`CheckError`] to stderr.
pub fn exit_code(result: CheckResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
