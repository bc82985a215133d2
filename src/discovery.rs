// src/discovery.rs
use crate::config::{Config, ScanConfig};
use crate::error::{CoverageError, Result};
use crate::types::FileUniverse;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Builds the coverage universe: every eligible source file under the root,
/// each starting at zero coverage.
///
/// Any walk or read failure aborts the scan; there is no partial universe.
///
/// # Errors
/// Returns `Scan` with the offending path if traversal or a file read fails.
pub fn discover(config: &Config) -> Result<FileUniverse> {
    let root = config.root.as_path();
    let scan = &config.scan;
    debug!(root = %root.display(), "scanning source tree");

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !should_prune(e, scan));

    let mut universe = FileUniverse::new();
    for item in walker {
        let entry = item?;
        if entry.file_type().is_dir() || !is_candidate(entry.file_name(), scan) {
            continue;
        }
        if is_entry_point(entry.path(), &scan.entry_marker)? {
            debug!(path = %entry.path().display(), "skipping entry-point file");
            continue;
        }
        universe.insert(normalize_path(entry.path(), root));
    }

    if universe.is_empty() {
        warn!(root = %root.display(), "no eligible source files found");
    }
    debug!(files = universe.len(), "scan complete");
    Ok(universe)
}

/// Hidden and fixture directories are never descended into. The root itself
/// is always walked, whatever its name.
fn should_prune(entry: &DirEntry, scan: &ScanConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let prune = name.starts_with('.') || name == scan.fixture_dir.as_str();
    if prune {
        debug!(dir = %entry.path().display(), "pruning directory");
    }
    prune
}

fn is_candidate(name: &OsStr, scan: &ScanConfig) -> bool {
    let name = name.to_string_lossy();
    name.ends_with(scan.extension.as_str()) && !name.ends_with(scan.test_suffix.as_str())
}

/// Line-exact match for the entry-point declaration.
///
/// This is a heuristic, not a parse: the marker also matches when it sits on
/// its own line inside a raw string or block comment.
fn is_entry_point(path: &Path, marker: &str) -> Result<bool> {
    let content = fs::read(path).map_err(|source| CoverageError::Scan {
        path: path.to_path_buf(),
        source,
    })?;
    let marker = marker.as_bytes();
    Ok(content.split(|b| *b == b'\n').any(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        line == marker
    }))
}

/// Canonical identity of a file: root-relative, `/`-separated, no leading `/`.
#[must_use]
pub fn normalize_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let normalized = relative.to_string_lossy().replace('\\', "/");
    normalized.trim_start_matches('/').to_string()
}
