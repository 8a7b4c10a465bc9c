//! `check-metric-descriptions registry`

use crate::cli::required_value;
use crate::descriptions::MetricRegistry;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{CheckError, CheckResult};
use crate::CliCommand;
use std::path::{Path, PathBuf};

/// Prints the active registry in verification order.
pub struct RegistryCommand;

impl CliCommand for RegistryCommand {
    type Options = Option<PathBuf>;

    fn parse(args: &[String]) -> CheckResult<Self::Options> {
        let mut registry = None;
        let mut iter = args.iter().cloned();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--registry" => registry = Some(PathBuf::from(required_value(&mut iter, &arg)?)),
                other => {
                    return Err(CheckError::validation(format!(
                        "unknown registry option: {other}"
                    )))
                }
            }
        }
        Ok(registry)
    }

    fn run(ctx: &CommandContext, registry: Self::Options) -> CheckResult<()> {
        let registry = super::load_registry(ctx, registry.as_deref())?;
        print!("{}", render_registry(&registry));
        Ok(())
    }
}

fn render_registry(registry: &MetricRegistry) -> String {
    let mut out = String::new();
    for entry in registry.entries() {
        out.push_str(&format!(
            "{}\n    source: {}\n    spec:   {}#{}\n",
            entry.metric_name,
            entry.source_file.display(),
            Path::new("model").join(&entry.spec_file).display(),
            entry.spec_entry_id
        ));
    }
    out.push_str(&format!("{} metric(s)\n", registry.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptions::MetricRegistryEntry;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_lists_entries_in_order() {
        let registry = MetricRegistry::from_entries(vec![
            MetricRegistryEntry::new("b.y", "src/B.java", "b/metrics.yaml", "metric.b.y"),
            MetricRegistryEntry::new("a.x", "src/A.java", "a/metrics.yaml", "metric.a.x"),
        ])
        .expect("registry");
        assert_eq!(
            render_registry(&registry),
            "b.y\n    source: src/B.java\n    spec:   model/b/metrics.yaml#metric.b.y\n\
             a.x\n    source: src/A.java\n    spec:   model/a/metrics.yaml#metric.a.x\n\
             2 metric(s)\n"
        );
    }

    #[test]
    fn parse_accepts_registry_override() {
        let parsed = RegistryCommand::parse(&["--registry".to_string(), "r.toml".to_string()])
            .expect("parse");
        assert_eq!(parsed, Some(PathBuf::from("r.toml")));
    }
}
