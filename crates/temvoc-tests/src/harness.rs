//! Test harness for running the mosaic command against files in a temp dir.

use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;
use temvoc_cli::cli_args::Cli;
use temvoc_cli::commands::json_output::MosaicReport;
use temvoc_cli::commands::mosaic::{self, RunError};

use crate::fixtures::{write_wav, WavFormat};

/// A temp working directory with helpers for building inputs and running.
pub struct TestHarness {
    /// Working directory for test inputs and outputs.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Path of `name` inside the working directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Writes a mono 16-bit WAV file into the working directory.
    pub fn mono_wav(&self, name: &str, samples: &[f32], sample_rate: u32) -> PathBuf {
        write_wav(&self.file(name), samples, sample_rate, 1, WavFormat::Pcm16)
    }

    /// Writes a WAV file of any format and channel count.
    pub fn wav(
        &self,
        name: &str,
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
        format: WavFormat,
    ) -> PathBuf {
        write_wav(&self.file(name), samples, sample_rate, channels, format)
    }

    /// Parses CLI arguments the way the binary would.
    pub fn parse(&self, args: &[&str]) -> Cli {
        let argv = std::iter::once("temvoc").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("Failed to parse arguments")
    }

    /// Runs the mosaic command as a library call.
    ///
    /// Runs in-process rather than as a subprocess so failures carry the
    /// typed error.
    pub fn run(&self, args: &[&str]) -> Result<MosaicReport, RunError> {
        let cli = self.parse(args);
        mosaic::execute(&cli, |_| {})
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Path as `&str` for argument lists.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}
