//! Canonical-description lookup in the semantic-conventions model.

use super::resolution::{Resolution, Unresolved};
use crate::runtime::error::{CheckError, CheckResult};
use serde_yaml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const MODEL_DIR: &str = "model";

/// Path of a specification document inside the dataset.
pub fn spec_document_path(dataset_path: &Path, spec_file: &Path) -> PathBuf {
    dataset_path.join(MODEL_DIR).join(spec_file)
}

/// Return the `brief` of the group whose `id` equals `entry_id`, if present.
///
/// A missing document, missing `groups`, unknown id, or missing `brief` all yield `None`.
/// Malformed YAML is an error.
pub fn lookup_canonical_description(
    dataset_path: &Path,
    spec_file: &Path,
    entry_id: &str,
) -> CheckResult<Option<String>> {
    resolve_canonical_description(dataset_path, spec_file, entry_id).map(Resolution::into_option)
}

/// Like [`lookup_canonical_description`], keeping the reason when nothing is found.
pub fn resolve_canonical_description(
    dataset_path: &Path,
    spec_file: &Path,
    entry_id: &str,
) -> CheckResult<Resolution> {
    let path = spec_document_path(dataset_path, spec_file);
    let body = match fs::read_to_string(&path) {
        Ok(body) => body,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(Resolution::Unresolved(Unresolved::SpecFileMissing(path)))
        }
        Err(err) => {
            return Err(CheckError::io(format!("failed to read {}: {err}", path.display()))
                .with_operation("lookup canonical description"))
        }
    };

    let document: Value = serde_yaml::from_str(&body).map_err(|err| {
        CheckError::config(format!("failed to parse {}: {err}", path.display()))
            .with_operation("lookup canonical description")
    })?;

    let Some(groups) = document.get("groups").and_then(Value::as_sequence) else {
        return Ok(Resolution::Unresolved(Unresolved::SpecGroupsMissing(path)));
    };

    let Some(group) = groups
        .iter()
        .find(|group| group.get("id").and_then(Value::as_str) == Some(entry_id))
    else {
        return Ok(Resolution::Unresolved(Unresolved::SpecGroupNotFound {
            path,
            entry_id: entry_id.to_string(),
        }));
    };

    Ok(match group.get("brief").and_then(Value::as_str) {
        Some(brief) => Resolution::Found(brief.to_string()),
        None => Resolution::Unresolved(Unresolved::BriefMissing {
            path,
            entry_id: entry_id.to_string(),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::CheckErrorCategory;
    use pretty_assertions::assert_eq;
    use crate::test_support::unique_temp_root;

    const HTTP_METRICS_YAML: &str = r#"
groups:
  - id: metric_attributes.http.server
    type: attribute_group
    brief: 'HTTP server attributes'
  - id: metric.http.server.request.duration
    type: metric
    metric_name: http.server.request.duration
    brief: "Duration of HTTP server requests."
    instrument: histogram
    unit: "s"
  - id: metric.http.server.active_requests
    type: metric
    instrument: updowncounter
"#;

    fn dataset_with(spec_file: &str, body: &str) -> PathBuf {
        let dataset = unique_temp_root("semconv_spec");
        let path = spec_document_path(&dataset, Path::new(spec_file));
        fs::create_dir_all(path.parent().expect("parent")).expect("create model dir");
        fs::write(&path, body).expect("write spec");
        dataset
    }

    #[test]
    fn returns_brief_of_matching_group() {
        let dataset = dataset_with("http/metrics.yaml", HTTP_METRICS_YAML);
        let brief = lookup_canonical_description(
            &dataset,
            Path::new("http/metrics.yaml"),
            "metric.http.server.request.duration",
        )
        .expect("lookup");
        assert_eq!(brief, Some("Duration of HTTP server requests.".to_string()));
        let _ = fs::remove_dir_all(dataset);
    }

    #[test]
    fn unknown_id_and_missing_brief_are_unresolved() {
        let dataset = dataset_with("http/metrics.yaml", HTTP_METRICS_YAML);
        let spec_file = Path::new("http/metrics.yaml");

        let unknown = resolve_canonical_description(&dataset, spec_file, "metric.nope")
            .expect("lookup unknown");
        assert!(matches!(
            unknown,
            Resolution::Unresolved(Unresolved::SpecGroupNotFound { .. })
        ));

        let no_brief =
            resolve_canonical_description(&dataset, spec_file, "metric.http.server.active_requests")
                .expect("lookup without brief");
        assert!(matches!(
            no_brief,
            Resolution::Unresolved(Unresolved::BriefMissing { .. })
        ));

        let _ = fs::remove_dir_all(dataset);
    }

    #[test]
    fn document_without_groups_is_unresolved() {
        let dataset = dataset_with("empty.yaml", "");
        let resolution = resolve_canonical_description(&dataset, Path::new("empty.yaml"), "x")
            .expect("lookup");
        assert!(matches!(
            resolution,
            Resolution::Unresolved(Unresolved::SpecGroupsMissing(_))
        ));
        let _ = fs::remove_dir_all(dataset);
    }

    #[test]
    fn missing_document_is_unresolved() {
        let dataset = dataset_with("http/metrics.yaml", HTTP_METRICS_YAML);
        let brief =
            lookup_canonical_description(&dataset, Path::new("rpc/metrics.yaml"), "metric.rpc")
                .expect("lookup");
        assert_eq!(brief, None);
        let _ = fs::remove_dir_all(dataset);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let dataset = dataset_with("broken.yaml", "groups: [\n  - id: x\n");
        let err = lookup_canonical_description(&dataset, Path::new("broken.yaml"), "x")
            .expect_err("malformed yaml should fail");
        assert_eq!(err.category, CheckErrorCategory::Config);
        assert!(err.message.contains("broken.yaml"));
        let _ = fs::remove_dir_all(dataset);
    }
}
