//! Top-level CLI parsing and help output.

use crate::runtime::error::{CheckError, CheckResult};
use std::path::PathBuf;

/// Top-level command families.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    Check(Vec<String>),
    Registry(Vec<String>),
    Help,
}

/// Options shared by every command family.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobalOptions {
    /// Project root; defaults to the current directory.
    pub root: Option<PathBuf>,
    /// Cache directory; defaults to `.artifacts/semconv-cache` under the root.
    pub cache_dir: Option<PathBuf>,
}

/// Parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub global: GlobalOptions,
    pub command: TopLevelCommand,
}

/// Parse raw command-line arguments.
///
/// Global options may appear anywhere. With no command, `check` runs with default options.
pub fn parse(args: Vec<String>) -> CheckResult<Invocation> {
    let mut global = GlobalOptions::default();
    let mut rest = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--root" => global.root = Some(PathBuf::from(required_value(&mut iter, "--root")?)),
            "--cache-dir" => {
                global.cache_dir = Some(PathBuf::from(required_value(&mut iter, "--cache-dir")?))
            }
            _ => rest.push(arg),
        }
    }

    let first = rest.first().cloned();
    let command = match first.as_deref() {
        None => TopLevelCommand::Check(Vec::new()),
        Some("check") => TopLevelCommand::Check(rest[1..].to_vec()),
        Some("registry") => TopLevelCommand::Registry(rest[1..].to_vec()),
        Some("help" | "--help" | "-h") => TopLevelCommand::Help,
        Some(flag) if flag.starts_with("--") => TopLevelCommand::Check(rest),
        Some(other) => {
            return Err(CheckError::validation(format!("unknown command: {other}"))
                .with_hint("run with `help` for usage"))
        }
    };
    Ok(Invocation { global, command })
}

/// Take the value following `flag`.
pub fn required_value(
    iter: &mut impl Iterator<Item = String>,
    flag: &str,
) -> CheckResult<String> {
    iter.next()
        .filter(|value| !value.starts_with("--"))
        .ok_or_else(|| CheckError::validation(format!("missing value for `{flag}`")))
}

/// Print the canonical top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: check-metric-descriptions [command] [options]\n\
         \n\
         Commands:\n\
           check (default)     Compare declared metric descriptions with semantic-conventions briefs\n\
           registry            List the metrics that would be checked\n\
           help                Show this text\n\
         \n\
         Global options:\n\
           --root <dir>        Project root (default: current directory)\n\
           --cache-dir <dir>   Dataset and run-log cache (default: .artifacts/semconv-cache)\n\
         \n\
         Check options:\n\
           --registry <file>   TOML registry of [[metric]] entries (default: built-in registry)\n\
           --repo-url <url>    semantic-conventions repository to clone\n\
           --branch <name>     Branch to clone (default: main)\n\
           --run-log           Keep events.jsonl and manifest.json under <cache-dir>/runs\n\
         \n\
         Exit status: 0 when no mismatches were found, 1 otherwise.\n"
    );
}
