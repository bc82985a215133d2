// src/types.rs
use serde::Serialize;
use std::collections::BTreeMap;

/// Display tier for a coverage percentage. Has no effect on the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No test touches the file at all.
    Uncovered,
    VeryLow,
    Low,
    Medium,
    Good,
    Excellent,
}

impl Severity {
    /// Tiers are half-open on the low end: exactly 40 is `Low`.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p == 0.0 => Self::Uncovered,
            p if p < 40.0 => Self::VeryLow,
            p if p < 60.0 => Self::Low,
            p if p < 80.0 => Self::Medium,
            p if p < 90.0 => Self::Good,
            _ => Self::Excellent,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Uncovered => "uncovered",
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

/// Every coverage-eligible file, keyed by module-relative path.
///
/// Iteration order is byte-wise lexicographic, so anything built from a
/// universe is deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileUniverse {
    files: BTreeMap<String, f64>,
}

impl FileUniverse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an eligible file with zero coverage.
    pub fn insert(&mut self, path: impl Into<String>) {
        self.files.insert(path.into(), 0.0);
    }

    /// Overwrites the coverage of a known file. Returns `false` if the path
    /// is not part of the universe.
    pub fn set_coverage(&mut self, path: &str, percent: f64) -> bool {
        match self.files.get_mut(path) {
            Some(slot) => {
                *slot = percent;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.files.iter().map(|(p, c)| (p.as_str(), *c))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FileUniverse {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut universe = Self::new();
        for path in iter {
            universe.insert(path);
        }
        universe
    }
}

/// One rendered line of the coverage table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    pub path: String,
    pub percentage: f64,
    pub severity: Severity,
}

impl CoverageRow {
    #[must_use]
    pub fn new(path: impl Into<String>, percentage: f64) -> Self {
        Self {
            path: path.into(),
            percentage,
            severity: Severity::from_percent(percentage),
        }
    }
}

/// Final, sorted result of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Counted files in path order.
    pub rows: Vec<CoverageRow>,
    /// Files under a non-counting directory; shown in diagnostics only.
    pub excluded: Vec<String>,
    /// Unweighted mean of the counted files' percentages.
    pub total: f64,
}

impl CoverageReport {
    #[must_use]
    pub fn total_severity(&self) -> Severity {
        Severity::from_percent(self.total)
    }

    #[must_use]
    pub fn uncovered_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.severity == Severity::Uncovered)
            .count()
    }
}
