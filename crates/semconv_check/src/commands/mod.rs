//! Command families.

pub mod check;
pub mod registry;

use crate::descriptions::MetricRegistry;
use crate::runtime::context::CommandContext;
use crate::runtime::error::CheckResult;
use std::path::Path;

/// Resolve the active registry: the TOML override when given, otherwise the built-in table.
pub(crate) fn load_registry(
    ctx: &CommandContext,
    override_path: Option<&Path>,
) -> CheckResult<MetricRegistry> {
    match override_path {
        Some(path) => MetricRegistry::load(ctx.root(), path),
        None => Ok(MetricRegistry::builtin()),
    }
}
