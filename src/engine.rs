// src/engine.rs
//! Scan → run → parse → reconcile, as one fallible pass.

use crate::config::Config;
use crate::discovery;
use crate::error::{CoverageError, Result};
use crate::profile;
use crate::project;
use crate::reconcile;
use crate::runner::CoverageRunner;
use crate::types::CoverageReport;
use tempfile::{Builder, TempPath};
use tracing::debug;

/// Produces the complete coverage report for the configured root.
///
/// The profile is written to a temporary file that is removed when this
/// returns, whether or not the run succeeded.
///
/// # Errors
/// Any scan, configuration, runner, profile, or reconciliation failure.
/// Nothing partial is returned.
pub fn run(config: &Config, runner: &dyn CoverageRunner) -> Result<CoverageReport> {
    let universe = discovery::discover(config)?;
    let module = project::module_path(config)?;
    debug!(module = %module, files = universe.len(), "module loaded");

    let profile_path = temp_profile(project::module_base_name(&module))?;
    runner.produce_profile(&config.root, &profile_path)?;

    let profiles = profile::read_profiles(&profile_path)?;
    debug!(profiles = profiles.len(), "profile parsed");

    reconcile::reconcile(universe, &module, &profiles, &config.report)
}

fn temp_profile(base: &str) -> Result<TempPath> {
    let prefix = format!("{base}-");
    Builder::new()
        .prefix(&prefix)
        .suffix(".out")
        .tempfile()
        .map(tempfile::NamedTempFile::into_temp_path)
        .map_err(CoverageError::TempFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_profile_is_named_after_module() {
        let path = temp_profile("widgets").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("widgets-"));
        assert!(name.ends_with(".out"));
        let kept = path.to_path_buf();
        drop(path);
        assert!(!kept.exists());
    }
}
