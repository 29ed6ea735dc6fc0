//! Mosaic command implementation
//!
//! Loads the carrier and modulator, runs the engine and writes the result in
//! the carrier's format. Nothing is written unless the engine succeeds.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use thiserror::Error;
use temvoc_core::{MosaicEngine, MosaicError};

use super::json_output::{error_codes, JsonError, MosaicOutput, MosaicReport};
use crate::audio::{self, AudioIoError, LoadedAudio};
use crate::cli_args::Cli;
use crate::reporting::{print_header, ProgressLine};

/// Errors that end a mosaic run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Reading or writing a WAV file failed.
    #[error(transparent)]
    Audio(#[from] AudioIoError),

    /// Carrier and modulator sample rates differ.
    #[error("carrier and modulator sample rates must match ({carrier} Hz vs {modulator} Hz)")]
    SampleRateMismatch {
        /// Carrier sample rate.
        carrier: u32,
        /// Modulator sample rate.
        modulator: u32,
    },

    /// The engine rejected its input.
    #[error(transparent)]
    Mosaic(#[from] MosaicError),
}

impl RunError {
    /// Converts to a JSON error with a stable code.
    pub fn to_json(&self) -> JsonError {
        match self {
            RunError::Audio(e) => {
                JsonError::new(e.code(), e.to_string()).with_file(display(e.path()))
            }
            RunError::SampleRateMismatch { .. } => {
                JsonError::new(error_codes::SAMPLE_RATE_MISMATCH, self.to_string())
            }
            RunError::Mosaic(e) => JsonError::new(e.code(), e.to_string()),
        }
    }
}

/// Decoded carrier and modulator.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Carrier audio and format.
    pub carrier: LoadedAudio,
    /// Modulator audio and format.
    pub modulator: LoadedAudio,
}

/// Run the mosaic command
///
/// # Arguments
/// * `cli` - Parsed command-line arguments
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.json {
        run_json(cli)
    } else {
        run_human(cli)
    }
}

/// Run with human-readable (colored) output
fn run_human(cli: &Cli) -> Result<ExitCode> {
    let inputs = load_inputs(cli)?;

    if !cli.quiet {
        let engine = build_engine(cli, &inputs)?;
        print_header(
            &cli.carrier,
            &cli.modulator,
            &cli.output,
            &cli.mosaic_config(),
            inputs.carrier.buffer.sample_rate,
            engine.corpus_frame_count(),
            engine.carrier_frame_count(),
        );
    }

    let mut progress = ProgressLine::new(!cli.quiet);
    let result = render(cli, &inputs, |fraction| progress.update(fraction));
    progress.finish();
    let report = result?;

    if !cli.quiet {
        eprintln!(
            "{} {} ({} samples, {} frames, hash {})",
            "Wrote".green().bold(),
            report.output,
            report.output_samples,
            report.carrier_frames,
            &report.pcm_hash[..16]
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Run with machine-readable JSON output
fn run_json(cli: &Cli) -> Result<ExitCode> {
    let (output, code) = match execute(cli, |_| {}) {
        Ok(report) => (MosaicOutput::success(report), ExitCode::SUCCESS),
        Err(e) => (MosaicOutput::failure(vec![e.to_json()]), ExitCode::from(1)),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

/// Loads both inputs and checks they share a sample rate.
pub fn load_inputs(cli: &Cli) -> Result<Inputs, RunError> {
    let carrier = audio::load_mono(&cli.carrier)?;
    let modulator = audio::load_mono(&cli.modulator)?;

    if carrier.buffer.sample_rate != modulator.buffer.sample_rate {
        return Err(RunError::SampleRateMismatch {
            carrier: carrier.buffer.sample_rate,
            modulator: modulator.buffer.sample_rate,
        });
    }

    Ok(Inputs { carrier, modulator })
}

/// Validates the flags against the loaded inputs.
pub fn build_engine<'a>(cli: &Cli, inputs: &'a Inputs) -> Result<MosaicEngine<'a>, RunError> {
    Ok(MosaicEngine::new(
        cli.mosaic_config(),
        &inputs.carrier.buffer,
        &inputs.modulator.buffer,
    )?)
}

/// Runs the engine on loaded inputs and writes the output file.
pub fn render<F>(cli: &Cli, inputs: &Inputs, on_progress: F) -> Result<MosaicReport, RunError>
where
    F: FnMut(f64),
{
    let config = cli.mosaic_config();
    let engine = build_engine(cli, inputs)?;
    let mosaic = engine.process(on_progress)?;

    audio::write_like(&cli.output, &mosaic.samples, &inputs.carrier.spec)?;

    Ok(MosaicReport {
        carrier: display(&cli.carrier),
        modulator: display(&cli.modulator),
        output: display(&cli.output),
        fft_size: config.frame_size,
        weighting: config.use_weighting,
        sample_rate: inputs.carrier.buffer.sample_rate,
        corpus_frames: mosaic.corpus_frames,
        carrier_frames: mosaic.carrier_frames,
        output_samples: mosaic.samples.len(),
        pcm_hash: audio::pcm_hash(&mosaic.samples),
    })
}

/// Loads, renders and writes in one step.
pub fn execute<F>(cli: &Cli, on_progress: F) -> Result<MosaicReport, RunError>
where
    F: FnMut(f64),
{
    let inputs = load_inputs(cli)?;
    render(cli, &inputs, on_progress)
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
