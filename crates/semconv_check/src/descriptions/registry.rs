use crate::runtime::config::ConfigLoader;
use crate::runtime::error::{CheckError, CheckResult};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const HTTP_SERVER_METRICS: &str =
    "instrumentation-api/src/main/java/io/opentelemetry/instrumentation/api/semconv/http/HttpServerMetrics.java";
const HTTP_CLIENT_METRICS: &str =
    "instrumentation-api/src/main/java/io/opentelemetry/instrumentation/api/semconv/http/HttpClientMetrics.java";
const HTTP_SERVER_EXPERIMENTAL_METRICS: &str =
    "instrumentation-api-incubator/src/main/java/io/opentelemetry/instrumentation/api/incubator/semconv/http/HttpServerExperimentalMetrics.java";
const HTTP_CLIENT_EXPERIMENTAL_METRICS: &str =
    "instrumentation-api-incubator/src/main/java/io/opentelemetry/instrumentation/api/incubator/semconv/http/HttpClientExperimentalMetrics.java";
const RPC_SERVER_METRICS: &str =
    "instrumentation-api-incubator/src/main/java/io/opentelemetry/instrumentation/api/incubator/semconv/rpc/RpcServerMetrics.java";
const RPC_CLIENT_METRICS: &str =
    "instrumentation-api-incubator/src/main/java/io/opentelemetry/instrumentation/api/incubator/semconv/rpc/RpcClientMetrics.java";
const DB_CLIENT_METRICS: &str =
    "instrumentation-api-incubator/src/main/java/io/opentelemetry/instrumentation/api/incubator/semconv/db/DbClientMetrics.java";
const GEN_AI_CLIENT_METRICS: &str =
    "instrumentation-api-incubator/src/main/java/io/opentelemetry/instrumentation/api/incubator/semconv/genai/GenAiClientMetrics.java";

/// `(metric name, source file, spec file, spec entry id)`, in verification order.
const BUILTIN_ENTRIES: &[(&str, &str, &str, &str)] = &[
    (
        "http.server.request.duration",
        HTTP_SERVER_METRICS,
        "http/metrics.yaml",
        "metric.http.server.request.duration",
    ),
    (
        "http.client.request.duration",
        HTTP_CLIENT_METRICS,
        "http/metrics.yaml",
        "metric.http.client.request.duration",
    ),
    (
        "http.server.active_requests",
        HTTP_SERVER_EXPERIMENTAL_METRICS,
        "http/metrics.yaml",
        "metric.http.server.active_requests",
    ),
    (
        "http.server.request.body.size",
        HTTP_SERVER_EXPERIMENTAL_METRICS,
        "http/metrics.yaml",
        "metric.http.server.request.body.size",
    ),
    (
        "http.server.response.body.size",
        HTTP_SERVER_EXPERIMENTAL_METRICS,
        "http/metrics.yaml",
        "metric.http.server.response.body.size",
    ),
    (
        "http.client.request.body.size",
        HTTP_CLIENT_EXPERIMENTAL_METRICS,
        "http/metrics.yaml",
        "metric.http.client.request.body.size",
    ),
    (
        "http.client.response.body.size",
        HTTP_CLIENT_EXPERIMENTAL_METRICS,
        "http/metrics.yaml",
        "metric.http.client.response.body.size",
    ),
    (
        "rpc.server.duration",
        RPC_SERVER_METRICS,
        "rpc/metrics.yaml",
        "metric.rpc.server.duration",
    ),
    (
        "rpc.client.duration",
        RPC_CLIENT_METRICS,
        "rpc/metrics.yaml",
        "metric.rpc.client.duration",
    ),
    (
        "db.client.operation.duration",
        DB_CLIENT_METRICS,
        "database/metrics.yaml",
        "metric.db.client.operation.duration",
    ),
    (
        "gen_ai.client.token.usage",
        GEN_AI_CLIENT_METRICS,
        "gen-ai/metrics.yaml",
        "metric.gen_ai.client.token.usage",
    ),
    (
        "gen_ai.client.operation.duration",
        GEN_AI_CLIENT_METRICS,
        "gen-ai/metrics.yaml",
        "metric.gen_ai.client.operation.duration",
    ),
];

/// One metric whose declared description is checked against the specification.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct MetricRegistryEntry {
    /// Instrument name as passed to the builder call.
    #[serde(rename = "name")]
    pub metric_name: String,
    /// Source file declaring the instrument, relative to the project root.
    pub source_file: PathBuf,
    /// Specification document, relative to the dataset `model/` directory.
    pub spec_file: PathBuf,
    /// `id` of the specification group holding the canonical brief.
    pub spec_entry_id: String,
}

impl MetricRegistryEntry {
    pub fn new(
        metric_name: impl Into<String>,
        source_file: impl Into<PathBuf>,
        spec_file: impl Into<PathBuf>,
        spec_entry_id: impl Into<String>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            source_file: source_file.into(),
            spec_file: spec_file.into(),
            spec_entry_id: spec_entry_id.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    metric: Vec<MetricRegistryEntry>,
}

/// Immutable, ordered metric registry.
///
/// Metric names are unique, so each entry is verified at most once per run. The registry is
/// built once at startup and only exposes read access afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetricRegistry {
    entries: Vec<MetricRegistryEntry>,
}

impl MetricRegistry {
    /// Build a registry, rejecting empty or duplicate metric names.
    pub fn from_entries(entries: Vec<MetricRegistryEntry>) -> CheckResult<Self> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if entry.metric_name.trim().is_empty() {
                return Err(CheckError::config("registry entry has an empty metric name"));
            }
            if !seen.insert(entry.metric_name.as_str()) {
                return Err(CheckError::config(format!(
                    "metric `{}` is registered more than once",
                    entry.metric_name
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The project's built-in registry.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|(name, source, spec, id)| MetricRegistryEntry::new(*name, *source, *spec, *id))
            .collect();
        Self { entries }
    }

    /// Load a registry from a TOML file of `[[metric]]` tables.
    ///
    /// Relative paths are resolved against `root`. File order becomes verification order.
    pub fn load(root: &Path, path: &Path) -> CheckResult<Self> {
        let loader = ConfigLoader::<RegistryFile>::new(root, path);
        let parsed = loader.load()?;
        if parsed.metric.is_empty() {
            return Err(CheckError::config(format!(
                "{} does not define any `[[metric]]` entries",
                loader.path().display()
            )));
        }
        Self::from_entries(parsed.metric).map_err(|err| err.with_path(loader.path()))
    }

    pub fn entries(&self) -> &[MetricRegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // Pairs with `len`; construction already rejects empty registries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::CheckErrorCategory;
    use std::fs;
    use crate::test_support::unique_temp_root;


    #[test]
    fn builtin_registry_is_valid_and_ordered() {
        let builtin = MetricRegistry::builtin();
        let validated = MetricRegistry::from_entries(builtin.entries().to_vec())
            .expect("builtin registry must pass validation");
        assert_eq!(validated, builtin);
        assert_eq!(
            builtin.entries()[0].metric_name,
            "http.server.request.duration"
        );
        for entry in builtin.entries() {
            assert_eq!(entry.spec_entry_id, format!("metric.{}", entry.metric_name));
        }
    }

    #[test]
    fn duplicate_metric_names_are_rejected() {
        let entry = MetricRegistryEntry::new("x.y", "A.java", "x/metrics.yaml", "metric.x.y");
        let err = MetricRegistry::from_entries(vec![entry.clone(), entry])
            .expect_err("duplicates should fail");
        assert_eq!(err.category, CheckErrorCategory::Config);
        assert!(err.message.contains("`x.y`"));
    }

    #[test]
    fn load_preserves_file_order() {
        let root = unique_temp_root("semconv_registry");
        fs::create_dir_all(&root).expect("create root");
        fs::write(
            root.join("registry.toml"),
            r#"
[[metric]]
name = "b.metric"
source_file = "src/B.java"
spec_file = "b/metrics.yaml"
spec_entry_id = "metric.b.metric"

[[metric]]
name = "a.metric"
source_file = "src/A.java"
spec_file = "a/metrics.yaml"
spec_entry_id = "metric.a.metric"
"#,
        )
        .expect("write registry");

        let registry =
            MetricRegistry::load(&root, Path::new("registry.toml")).expect("load registry");
        let names = registry
            .entries()
            .iter()
            .map(|entry| entry.metric_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["b.metric", "a.metric"]);
        assert_eq!(
            registry.entries()[1].source_file,
            PathBuf::from("src/A.java")
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn load_rejects_empty_registry_file() {
        let root = unique_temp_root("semconv_registry");
        fs::create_dir_all(&root).expect("create root");
        fs::write(root.join("empty.toml"), "").expect("write registry");

        let err = MetricRegistry::load(&root, Path::new("empty.toml"))
            .expect_err("empty registry should fail");
        assert_eq!(err.category, CheckErrorCategory::Config);

        let _ = fs::remove_dir_all(root);
    }
}
