//! CLI argument definitions for the temvoc command-line interface.
//!
//! The `#[derive(Parser)]` type lives here, keeping `main.rs` focused on
//! dispatch and exit codes.

use std::path::PathBuf;

use clap::Parser;
use temvoc_core::{MosaicConfig, DEFAULT_FRAME_SIZE, MAX_FRAME_SIZE, MIN_FRAME_SIZE};

/// temvoc - temporal vocoder
///
/// Rebuilds the carrier out of the modulator: every carrier frame is replaced
/// by the modulator frame with the closest magnitude spectrum.
#[derive(Parser, Debug, Clone)]
#[command(name = "temvoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Apply A-weighting during matching
    #[arg(short, long)]
    pub weighting: bool,

    /// FFT size (power of 2, 64-8192)
    #[arg(short, long, value_name = "SIZE", default_value_t = DEFAULT_FRAME_SIZE, value_parser = parse_fft_size)]
    pub fft_size: usize,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,

    /// Suppress the header and progress line
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to carrier audio file
    #[arg(value_name = "CARRIER")]
    pub carrier: PathBuf,

    /// Path to modulator audio file
    #[arg(value_name = "MODULATOR")]
    pub modulator: PathBuf,

    /// Path to output audio file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

impl Cli {
    /// Engine configuration from the parsed flags.
    pub fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig::new(self.fft_size, self.weighting)
    }
}

/// Parses and validates an FFT size argument.
pub fn parse_fft_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("FFT size could not be parsed: '{}'", value))?;

    if !(MIN_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&size) {
        return Err(format!(
            "FFT size must be between {} and {}",
            MIN_FRAME_SIZE, MAX_FRAME_SIZE
        ));
    }
    if !size.is_power_of_two() {
        return Err("FFT size must be a power of 2".to_string());
    }
    Ok(size)
}
