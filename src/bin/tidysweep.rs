// src/bin/tidysweep.rs
use clap::Parser;
use colored::Colorize;

use tidysweep_core::cli::{handlers, Cli};
use tidysweep_core::exit::SweepExit;
use tidysweep_core::logging;

fn main() -> SweepExit {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match handlers::handle(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "ERROR:".red().bold());
            SweepExit::Error
        }
    }
}
