// src/cli/handlers.rs
use crate::cli::args::Cli;
use crate::config::Config;
use crate::engine;
use crate::exit::CovTableExit;
use crate::reporting;
use crate::runner::{CoverageRunner, ExistingProfile, GoTestRunner};
use anyhow::{Context, Result};
use std::io::IsTerminal;

/// Handles the (only) report command.
///
/// # Errors
/// Returns error if configuration, scanning, the test run, profile parsing,
/// or reconciliation fails. Nothing is printed to stdout in that case.
pub fn handle_report(cli: &Cli) -> Result<CovTableExit> {
    let config = Config::load(&cli.path)
        .with_context(|| format!("Unable to load settings for {}", cli.path.display()))?;

    let runner: Box<dyn CoverageRunner> = match &cli.profile {
        Some(path) => Box::new(ExistingProfile::new(path)),
        None => Box::new(GoTestRunner::new(&config.runner)),
    };

    let report = engine::run(&config, &*runner)
        .context("Unable to generate coverage table")?;

    let color = !cli.no_color && std::io::stdout().is_terminal();
    reporting::print_report(&report, cli.format, color)?;
    Ok(CovTableExit::Success)
}
