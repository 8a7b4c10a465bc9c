//! Registry-driven comparison of declared and canonical metric descriptions.

use super::dataset::{ensure_spec_dataset, DatasetFetcher};
use super::registry::{MetricRegistry, MetricRegistryEntry};
use super::report::{write_report, CheckSummary, MismatchRecord};
use super::resolution::{Resolution, Unresolved};
use super::source::resolve_declared_description;
use super::spec::resolve_canonical_description;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{CheckError, CheckResult};
use std::fs;
use std::path::Path;

/// Per-entry verification outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryOutcome {
    Matched,
    Mismatched(MismatchRecord),
    Unverified(Unresolved),
}

/// Checks every registry entry against the specification dataset.
pub struct DescriptionChecker<'a> {
    ctx: &'a CommandContext,
    registry: &'a MetricRegistry,
    fetcher: &'a dyn DatasetFetcher,
}

impl<'a> DescriptionChecker<'a> {
    pub fn new(
        ctx: &'a CommandContext,
        registry: &'a MetricRegistry,
        fetcher: &'a dyn DatasetFetcher,
    ) -> Self {
        Self {
            ctx,
            registry,
            fetcher,
        }
    }

    /// Run the full check.
    ///
    /// Only a failed dataset fetch or a malformed spec document is an error. Everything else is
    /// folded into the returned summary; [`CheckSummary::passed`] is the verdict.
    pub fn run(&self) -> CheckResult<CheckSummary> {
        let workflow = self.ctx.workflow();
        let dataset = workflow.run_timed_stage("Prepare semantic-conventions dataset", || {
            ensure_spec_dataset(self.ctx.artifacts().cache_dir(), self.fetcher)
        })?;
        if !dataset.join("model").is_dir() {
            workflow.warn(&format!(
                "{} has no `model/` directory; delete it to force a fresh fetch",
                dataset.display()
            ));
        }

        let mut summary = workflow.run_timed_stage("Verify metric descriptions", || {
            self.verify_all(&dataset)
        })?;

        let report = self.ctx.artifacts().mismatch_report();
        if summary.passed() {
            // A report left by an earlier failing run no longer describes this dataset.
            if report.is_file() {
                fs::remove_file(&report).map_err(|err| {
                    CheckError::io(format!("failed to remove {}: {err}", report.display()))
                })?;
            }
        } else {
            write_report(&report, &dataset, &summary.mismatches)?;
            println!("Wrote mismatch report: {}", report.display());
            summary.report_path = Some(report);
        }
        println!("\n{}", summary.summary_line());
        Ok(summary)
    }

    fn verify_all(&self, dataset: &Path) -> CheckResult<CheckSummary> {
        let mut summary = CheckSummary::default();
        for entry in self.registry.entries() {
            let outcome = self.verify_entry(dataset, entry)?;
            self.report_outcome(entry, &outcome)?;
            summary.checked += 1;
            match outcome {
                EntryOutcome::Matched => summary.matched.push(entry.metric_name.clone()),
                EntryOutcome::Mismatched(record) => summary.mismatches.push(record),
                EntryOutcome::Unverified(_) => summary.unverified.push(entry.metric_name.clone()),
            }
        }
        Ok(summary)
    }

    /// Compare one entry. Absence on either side is never a mismatch.
    pub fn verify_entry(
        &self,
        dataset: &Path,
        entry: &MetricRegistryEntry,
    ) -> CheckResult<EntryOutcome> {
        let source = self.ctx.artifacts().resolve_path(&entry.source_file);
        let declared = match resolve_declared_description(&source, &entry.metric_name) {
            Resolution::Found(declared) => declared,
            Resolution::Unresolved(reason) => return Ok(EntryOutcome::Unverified(reason)),
        };
        let canonical =
            match resolve_canonical_description(dataset, &entry.spec_file, &entry.spec_entry_id)? {
                Resolution::Found(canonical) => canonical,
                Resolution::Unresolved(reason) => return Ok(EntryOutcome::Unverified(reason)),
            };

        if declared == canonical {
            Ok(EntryOutcome::Matched)
        } else {
            Ok(EntryOutcome::Mismatched(MismatchRecord {
                metric_name: entry.metric_name.clone(),
                source_file: entry.source_file.clone(),
                extracted_description: declared,
                canonical_description: canonical,
            }))
        }
    }

    fn report_outcome(
        &self,
        entry: &MetricRegistryEntry,
        outcome: &EntryOutcome,
    ) -> CheckResult<()> {
        let workflow = self.ctx.workflow();
        let (status, detail) = match outcome {
            EntryOutcome::Matched => {
                println!("[ok] {}", entry.metric_name);
                ("matched", None)
            }
            EntryOutcome::Mismatched(record) => {
                println!(
                    "[mismatch] {}: declared {:?}, expected {:?} ({})",
                    entry.metric_name,
                    record.extracted_description,
                    record.canonical_description,
                    record.source_file.display()
                );
                ("mismatched", None)
            }
            EntryOutcome::Unverified(reason) => {
                workflow.warn(&format!("{}: could not verify: {reason}", entry.metric_name));
                ("unverified", Some(reason.to_string()))
            }
        };
        workflow.record_event(serde_json::json!({
            "type": "entry_verified",
            "metric": entry.metric_name,
            "source_file": entry.source_file.display().to_string(),
            "spec_file": entry.spec_file.display().to_string(),
            "spec_entry_id": entry.spec_entry_id,
            "status": status,
            "detail": detail
        }))
    }
}
