//! Declared-description extraction from instrumentation sources.
//!
//! This is a textual heuristic, not a Java parser. The metric name must appear as a string
//! literal in a `histogramBuilder`, `counterBuilder`, or `upDownCounterBuilder` call, and the
//! description is the first single-line `setDescription("...")` literal after that call.
//! Concatenated or multi-line descriptions resolve as not found.

use super::resolution::{Resolution, Unresolved};
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

/// Return the description declared for `metric_name` in `source_file`, if one can be found.
pub fn extract_declared_description(source_file: &Path, metric_name: &str) -> Option<String> {
    resolve_declared_description(source_file, metric_name).into_option()
}

/// Like [`extract_declared_description`], keeping the reason when nothing is found.
pub fn resolve_declared_description(source_file: &Path, metric_name: &str) -> Resolution {
    let text = match fs::read_to_string(source_file) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Resolution::Unresolved(Unresolved::SourceFileMissing(
                source_file.to_path_buf(),
            ))
        }
        Err(err) => {
            return Resolution::Unresolved(Unresolved::SourceUnreadable {
                path: source_file.to_path_buf(),
                error: err.to_string(),
            })
        }
    };

    match scan_declared_description(&text, metric_name) {
        Scan::Found(description) => Resolution::Found(description),
        Scan::NoBuilder => {
            Resolution::Unresolved(Unresolved::BuilderCallNotFound(source_file.to_path_buf()))
        }
        Scan::NoDescription => Resolution::Unresolved(Unresolved::DescriptionCallNotFound(
            source_file.to_path_buf(),
        )),
    }
}

#[derive(Debug, Eq, PartialEq)]
enum Scan {
    Found(String),
    NoBuilder,
    NoDescription,
}

fn scan_declared_description(text: &str, metric_name: &str) -> Scan {
    let Some(anchor_end) = builder_call_re()
        .captures_iter(text)
        .find(|captures| captures.get(1).map(|name| name.as_str()) == Some(metric_name))
        .and_then(|captures| captures.get(0))
        .map(|call| call.end())
    else {
        return Scan::NoBuilder;
    };

    match description_call_re()
        .captures(&text[anchor_end..])
        .and_then(|captures| captures.get(1))
    {
        Some(literal) => Scan::Found(literal.as_str().to_string()),
        None => Scan::NoDescription,
    }
}

fn builder_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:histogramBuilder|counterBuilder|upDownCounterBuilder)\(\s*"([^"\n]*)"\s*\)"#)
            .expect("builder-call regex must compile")
    })
}

fn description_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\.setDescription\(\s*"([^"\n]*)"\s*\)"#)
            .expect("description-call regex must compile")
    })
}
