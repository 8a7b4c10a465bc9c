//! `check-metric-descriptions [check]`

use crate::cli::required_value;
use crate::descriptions::dataset::{DEFAULT_BRANCH, DEFAULT_REPO_URL};
use crate::descriptions::{CheckSummary, DescriptionChecker, GitDatasetFetcher};
use crate::runtime::context::CommandContext;
use crate::runtime::error::{CheckError, CheckResult};
use crate::CliCommand;
use std::path::PathBuf;

const WORKFLOW_NAME: &str = "metric-descriptions";

/// Options for the description check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckOptions {
    pub registry: Option<PathBuf>,
    pub repo_url: String,
    pub branch: String,
    /// Persist `events.jsonl` and `manifest.json` under the cache `runs/` directory.
    pub run_log: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            registry: None,
            repo_url: DEFAULT_REPO_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            run_log: false,
        }
    }
}

/// Compares declared metric descriptions against the semantic-conventions model.
pub struct CheckCommand;

impl CliCommand for CheckCommand {
    type Options = CheckOptions;

    fn parse(args: &[String]) -> CheckResult<Self::Options> {
        let mut options = CheckOptions::default();
        let mut iter = args.iter().cloned();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--registry" => {
                    options.registry = Some(PathBuf::from(required_value(&mut iter, &arg)?))
                }
                "--repo-url" => options.repo_url = required_value(&mut iter, &arg)?,
                "--branch" => options.branch = required_value(&mut iter, &arg)?,
                "--run-log" => options.run_log = true,
                other => {
                    return Err(CheckError::validation(format!(
                        "unknown check option: {other}"
                    )))
                }
            }
        }
        Ok(options)
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> CheckResult<()> {
        let registry = super::load_registry(ctx, options.registry.as_deref())?;
        let fetcher =
            GitDatasetFetcher::with_source(*ctx.process(), options.repo_url, options.branch);
        let checker = DescriptionChecker::new(ctx, &registry, &fetcher);
        let check = || verdict(checker.run()?);

        if options.run_log {
            ctx.workflow().with_workflow_run(WORKFLOW_NAME, check)
        } else {
            check()
        }
    }
}

fn verdict(summary: CheckSummary) -> CheckResult<()> {
    if summary.passed() {
        return Ok(());
    }
    let mut err = CheckError::validation(format!(
        "{} metric description mismatch(es) found",
        summary.mismatches.len()
    ));
    if let Some(report) = &summary.report_path {
        err = err.with_path(report);
    }
    Err(err.with_hint("update setDescription(...) to match the semantic-conventions brief"))
}
