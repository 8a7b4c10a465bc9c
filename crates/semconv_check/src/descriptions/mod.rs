//! Metric description consistency checks.
//!
//! Each registered metric's description, as literally declared in its instrumentation source, must
//! equal the `brief` of the matching group in the semantic-conventions model. Metrics whose
//! description cannot be resolved on either side are reported as warnings and never count as
//! mismatches.

pub mod checker;
pub mod dataset;
pub mod registry;
pub mod report;
pub mod resolution;
pub mod source;
pub mod spec;

pub use checker::{DescriptionChecker, EntryOutcome};
pub use dataset::{ensure_spec_dataset, DatasetFetcher, GitDatasetFetcher};
pub use registry::{MetricRegistry, MetricRegistryEntry};
pub use report::{CheckSummary, MismatchRecord};
pub use source::extract_declared_description;
pub use spec::lookup_canonical_description;
