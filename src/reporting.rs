//! Output formatting for coverage reports.
//!
//! The table has two columns (file, percentage) in report order, followed by
//! a `TOTAL` footer. Column widths are measured on the unstyled text so
//! colors never break alignment.

use crate::types::{CoverageReport, CoverageRow, Severity};
use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Prints a report to stdout in the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn print_report(report: &CoverageReport, format: OutputFormat, color: bool) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", render_table(report, color)),
        OutputFormat::Json => println!("{}", render_json(report)?),
    }
    Ok(())
}

/// # Errors
/// Returns error if serialization fails.
pub fn render_json(report: &CoverageReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[must_use]
pub fn render_table(report: &CoverageReport, color: bool) -> String {
    const FOOTER: &str = "TOTAL";

    let cells: Vec<(&CoverageRow, String)> = report
        .rows
        .iter()
        .map(|r| (r, format_percent(r.percentage)))
        .collect();
    let total = format_percent(report.total);

    let name_width = cells
        .iter()
        .map(|(r, _)| r.path.chars().count())
        .chain(std::iter::once(FOOTER.len()))
        .max()
        .unwrap_or(0);
    let pct_width = cells
        .iter()
        .map(|(_, p)| p.len())
        .chain(std::iter::once(total.len()))
        .max()
        .unwrap_or(0);

    let border = format!(
        "+{}+{}+",
        "-".repeat(name_width + 2),
        "-".repeat(pct_width + 2)
    );

    let mut out = String::new();
    let _ = writeln!(out, "{border}");
    for (row, pct) in &cells {
        let name = format!("{:<name_width$}", row.path);
        let pct = format!("{pct:>pct_width$}");
        let (name, pct) = style_cells(&name, &pct, row.severity, color);
        let _ = writeln!(out, "| {name} | {pct} |");
    }
    let _ = writeln!(out, "{border}");

    let name = format!("{FOOTER:>name_width$}");
    let pct = format!("{total:>pct_width$}");
    let (name, pct) = style_cells(&name, &pct, report.total_severity(), color);
    let _ = writeln!(out, "| {name} | {pct} |");
    let _ = writeln!(out, "{border}");
    out
}

fn format_percent(percent: f64) -> String {
    format!("{percent:.2}")
}

/// Uncovered files are flagged on both cells; every other tier only tints
/// the percentage.
fn style_cells(name: &str, pct: &str, severity: Severity, color: bool) -> (String, String) {
    if !color {
        return (name.to_string(), pct.to_string());
    }
    let name = match severity {
        Severity::Uncovered => name.bright_red().to_string(),
        _ => name.to_string(),
    };
    (name, tint(pct, severity).to_string())
}

fn tint(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Uncovered | Severity::VeryLow => text.bright_red(),
        Severity::Low => text.red(),
        Severity::Medium => text.yellow(),
        Severity::Good => text.green(),
        Severity::Excellent => text.bright_green(),
    }
}
