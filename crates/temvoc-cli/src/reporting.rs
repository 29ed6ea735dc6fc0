//! Console reporting: run header and in-place progress line.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use temvoc_core::MosaicConfig;

/// Prints the run header to stderr.
pub(crate) fn print_header(
    carrier: &Path,
    modulator: &Path,
    output: &Path,
    config: &MosaicConfig,
    sample_rate: u32,
    corpus_frames: usize,
    carrier_frames: usize,
) {
    let weighting = if config.use_weighting {
        "On".green()
    } else {
        "Off".dimmed()
    };
    eprintln!("{} {}", "Carrier:    ".dimmed(), carrier.display());
    eprintln!("{} {}", "Modulator:  ".dimmed(), modulator.display());
    eprintln!("{} {}", "Output:     ".dimmed(), output.display());
    eprintln!("{} {}", "FFT Size:   ".dimmed(), config.frame_size);
    eprintln!("{} {}", "A-Weighting:".dimmed(), weighting);
    eprintln!("{} {} Hz", "Sample Rate:".dimmed(), sample_rate);
    eprintln!("{} {} frames", "Corpus:     ".dimmed(), corpus_frames);
    eprintln!("{} {} frames", "Frames:     ".dimmed(), carrier_frames);
}

/// Rewrites a single `Processing NN%` line on stderr.
#[derive(Debug)]
pub(crate) struct ProgressLine {
    enabled: bool,
    last_percent: Option<u32>,
}

impl ProgressLine {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            last_percent: None,
        }
    }

    /// Updates the line; redraws only when the whole percentage changes.
    pub(crate) fn update(&mut self, fraction: f64) {
        if !self.enabled {
            return;
        }
        let percent = percent_of(fraction);
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);

        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{} {:>3}% \r", "Processing".cyan(), percent);
        let _ = stderr.flush();
    }

    /// Ends the progress line.
    pub(crate) fn finish(&mut self) {
        if self.enabled && self.last_percent.is_some() {
            eprintln!();
        }
    }
}

/// Whole percentage for a completion fraction, clamped to 0..=100.
pub(crate) fn percent_of(fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}
