use crate::runtime::error::{CheckError, CheckResult};
use chrono::{SecondsFormat, Utc};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// A metric whose declared description differs from the canonical brief.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MismatchRecord {
    pub metric_name: String,
    pub source_file: PathBuf,
    pub extracted_description: String,
    pub canonical_description: String,
}

/// Result of one full pass over the registry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CheckSummary {
    pub checked: usize,
    pub matched: Vec<String>,
    pub unverified: Vec<String>,
    pub mismatches: Vec<MismatchRecord>,
    /// Set only when mismatches were found and the report was written.
    pub report_path: Option<PathBuf>,
}

impl CheckSummary {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Final console line.
    pub fn summary_line(&self) -> String {
        if self.passed() {
            format!(
                "OK: {} matched, {} could not be verified ({} metric(s) checked)",
                self.matched.len(),
                self.unverified.len(),
                self.checked
            )
        } else {
            format!(
                "FAILED: {} mismatch(es), {} matched, {} could not be verified ({} metric(s) checked)",
                self.mismatches.len(),
                self.matched.len(),
                self.unverified.len(),
                self.checked
            )
        }
    }
}

/// Render the plain-text mismatch report.
pub fn render_report(dataset_path: &Path, mismatches: &[MismatchRecord]) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "# Metric description mismatches");
    let _ = writeln!(
        body,
        "# generated: {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(body, "# dataset: {}", dataset_path.display());
    let _ = writeln!(body, "# mismatches: {}", mismatches.len());
    for mismatch in mismatches {
        let _ = writeln!(body);
        let _ = writeln!(body, "Metric: {}", mismatch.metric_name);
        let _ = writeln!(body, "File: {}", mismatch.source_file.display());
        let _ = writeln!(body, "Declared: {}", mismatch.extracted_description);
        let _ = writeln!(body, "Expected: {}", mismatch.canonical_description);
    }
    body
}

/// Write the mismatch report to `output`, creating parent directories as needed.
pub fn write_report(
    output: &Path,
    dataset_path: &Path,
    mismatches: &[MismatchRecord],
) -> CheckResult<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            CheckError::io(format!("failed to create {}: {err}", parent.display()))
        })?;
    }
    fs::write(output, render_report(dataset_path, mismatches))
        .map_err(|err| CheckError::io(format!("failed to write {}: {err}", output.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mismatch() -> MismatchRecord {
        MismatchRecord {
            metric_name: "x.y".into(),
            source_file: PathBuf::from("src/XMetrics.java"),
            extracted_description: "Foo".into(),
            canonical_description: "Bar".into(),
        }
    }

    #[test]
    fn report_lists_each_mismatch_block() {
        let body = render_report(Path::new("/cache/semantic-conventions"), &[mismatch()]);
        let blocks = body.split("\n\n").collect::<Vec<_>>();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("# mismatches: 1"));
        assert_eq!(
            blocks[1],
            "Metric: x.y\nFile: src/XMetrics.java\nDeclared: Foo\nExpected: Bar\n"
        );
    }

    #[test]
    fn passed_tracks_mismatches() {
        let mut summary = CheckSummary {
            checked: 2,
            matched: vec!["a.b".into()],
            unverified: vec!["c.d".into()],
            ..CheckSummary::default()
        };
        assert!(summary.passed());
        assert!(summary.summary_line().starts_with("OK: 1 matched, 1 could not be verified"));

        summary.mismatches.push(mismatch());
        assert!(!summary.passed());
        assert!(summary.summary_line().starts_with("FAILED: 1 mismatch(es)"));
    }
}
