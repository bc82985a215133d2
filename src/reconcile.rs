// src/reconcile.rs
//! Merges the scanned file universe with a partial coverage profile.
//!
//! Coverage tools only report files that some executed statement touched.
//! The universe supplies everything else at 0%, so untested files show up
//! in the table instead of vanishing from it.

use crate::config::ReportConfig;
use crate::error::{CoverageError, Result};
use crate::profile::Profile;
use crate::types::{CoverageReport, CoverageRow, FileUniverse};
use tracing::debug;

/// Percentage of statements in blocks that executed at least once.
/// A profile with no statements is 0%, never NaN.
#[must_use]
pub fn percent_covered(profile: &Profile) -> f64 {
    // u64 counts summed over at most usize::MAX blocks always fit in u128.
    let (covered, total) = profile.blocks.iter().fold((0u128, 0u128), |(c, t), b| {
        let stmts = u128::from(b.num_stmt);
        let c = if b.count > 0 { c + stmts } else { c };
        (c, t + stmts)
    });
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let percent = covered as f64 / total as f64 * 100.0;
    percent
}

/// Maps a module-prefixed profile name onto the scanner's path form.
#[must_use]
pub fn relative_name<'a>(file_name: &'a str, module: &str) -> &'a str {
    file_name
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(file_name)
}

/// Writes each profile's percentage into the universe.
///
/// # Errors
/// Returns `Mismatch` for the first profile whose file is not in the
/// universe; the universe is left partially updated in that case.
pub fn apply_profiles(
    universe: &mut FileUniverse,
    module: &str,
    profiles: &[Profile],
) -> Result<()> {
    for profile in profiles {
        let name = relative_name(&profile.file_name, module);
        let percent = percent_covered(profile);
        if !universe.set_coverage(name, percent) {
            for known in universe.paths() {
                debug!(file = known, "scanned");
            }
            return Err(CoverageError::Mismatch {
                file_name: profile.file_name.clone(),
                path: name.to_string(),
                known: universe.len(),
            });
        }
        debug!(file = name, percent, "reconciled");
    }
    Ok(())
}

/// True if any directory component of `path` is a non-counting segment.
#[must_use]
pub fn is_non_counting(path: &str, report: &ReportConfig) -> bool {
    let mut dirs = path.split('/').collect::<Vec<_>>();
    dirs.pop();
    dirs.iter().any(|dir| {
        report
            .non_counting
            .iter()
            .any(|segment| segment.trim_matches('/') == *dir)
    })
}

/// Partitions, sorts, and totals an already reconciled universe.
///
/// # Errors
/// Returns `EmptyAggregate` if no counted files remain.
pub fn summarize(universe: &FileUniverse, report: &ReportConfig) -> Result<CoverageReport> {
    let mut rows = Vec::with_capacity(universe.len());
    let mut excluded = Vec::new();

    for (path, percent) in universe.iter() {
        if is_non_counting(path, report) {
            debug!(file = path, percent, "excluded from total");
            excluded.push(path.to_string());
        } else {
            rows.push(CoverageRow::new(path, percent));
        }
    }

    // Byte-wise, whatever the container's own order.
    rows.sort_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));

    if rows.is_empty() {
        return Err(CoverageError::EmptyAggregate {
            excluded: excluded.len(),
        });
    }

    let sum: f64 = rows.iter().map(|r| r.percentage).sum();
    #[allow(clippy::cast_precision_loss)]
    let total = sum / rows.len() as f64;

    Ok(CoverageReport {
        rows,
        excluded,
        total,
    })
}

/// Full reconciliation: apply the profile, then summarize.
///
/// # Errors
/// Returns `Mismatch` or `EmptyAggregate`; see [`apply_profiles`] and
/// [`summarize`].
pub fn reconcile(
    mut universe: FileUniverse,
    module: &str,
    profiles: &[Profile],
    report: &ReportConfig,
) -> Result<CoverageReport> {
    apply_profiles(&mut universe, module, profiles)?;
    summarize(&universe, report)
}
