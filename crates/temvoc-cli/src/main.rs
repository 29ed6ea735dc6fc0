//! temvoc - temporal vocoder
//!
//! Rebuilds a carrier recording out of short spectral frames of a modulator
//! recording and writes the result as a WAV file.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use temvoc_cli::cli_args::Cli;
use temvoc_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::mosaic::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}
