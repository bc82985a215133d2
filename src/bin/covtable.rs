// src/bin/covtable.rs
use clap::Parser;

use covtable_core::cli::{self, Cli};
use covtable_core::exit::CovTableExit;
use covtable_core::logging;

fn main() -> CovTableExit {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    match cli::handle_report(&cli) {
        Ok(exit) => exit,
        Err(e) => CovTableExit::from(Err(e)),
    }
}
