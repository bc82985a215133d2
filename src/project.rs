// src/project.rs
//! Module identity: the canonical path declared in `go.mod`.

use crate::config::Config;
use crate::error::{CoverageError, Result};
use std::fs;

/// Reads the module path declared by the module-definition file under the
/// configured root.
///
/// # Errors
/// Returns `Config` if the file is missing or unreadable, and
/// `MissingModuleDirective` if it declares no module.
pub fn module_path(config: &Config) -> Result<String> {
    let path = config.module_file();
    let content = fs::read_to_string(&path).map_err(|source| CoverageError::Config {
        path: std::path::absolute(&path).unwrap_or_else(|_| path.clone()),
        source,
    })?;
    parse_module_path(&content).ok_or(CoverageError::MissingModuleDirective { path })
}

/// Extracts the first `module` directive, bare or quoted.
#[must_use]
pub fn parse_module_path(content: &str) -> Option<String> {
    content.lines().find_map(module_directive)
}

fn module_directive(line: &str) -> Option<String> {
    let line = strip_comment(line).trim();
    let rest = line.strip_prefix("module")?;
    if !rest.is_empty() && !rest.starts_with([' ', '\t', '"', '`']) {
        return None;
    }
    let value = unquote(rest.trim());
    (!value.is_empty()).then(|| value.to_string())
}

fn strip_comment(line: &str) -> &str {
    line.find("//").map_or(line, |idx| &line[..idx])
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '`'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Last path element of the module, used to name temporary files.
#[must_use]
pub fn module_base_name(module: &str) -> &str {
    module.rsplit('/').next().unwrap_or(module)
}
