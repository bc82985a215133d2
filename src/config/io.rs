use super::types::{Config, CovTableToml};
use crate::error::{CoverageError, Result};
use std::fs;
use std::path::Path;

pub const SETTINGS_FILE: &str = "covtable.toml";

/// Applies `covtable.toml` from the root, if there is one.
pub(super) fn load_toml_config(config: &mut Config) -> Result<()> {
    let path = config.root.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(());
    }
    let content = fs::read_to_string(&path).map_err(|e| CoverageError::Settings {
        path: path.clone(),
        message: e.to_string(),
    })?;
    parse_toml(config, &content, &path)
}

pub(super) fn parse_toml(config: &mut Config, content: &str, origin: &Path) -> Result<()> {
    let parsed: CovTableToml = toml::from_str(content).map_err(|e| CoverageError::Settings {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    config.scan = parsed.scan;
    config.report = parsed.report;
    config.runner = parsed.runner;
    Ok(())
}
