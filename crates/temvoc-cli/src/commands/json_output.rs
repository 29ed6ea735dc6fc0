//! JSON output types for machine-readable CLI output.
//!
//! Printed to stdout when `--json` is given, in place of the colored
//! console report.

use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Engine failures pass through the engine's own `TEMVOC_xxx` codes.
pub mod error_codes {
    /// Input file could not be opened or decoded
    pub const FILE_READ: &str = "CLI_001";
    /// Input file has more than one channel
    pub const NOT_MONO: &str = "CLI_002";
    /// Sample format or bit depth not supported
    pub const UNSUPPORTED_FORMAT: &str = "CLI_003";
    /// Carrier and modulator sample rates differ
    pub const SAMPLE_RATE_MISMATCH: &str = "CLI_004";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "TEMVOC_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Details of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MosaicReport {
    /// Carrier file path
    pub carrier: String,
    /// Modulator file path
    pub modulator: String,
    /// Output file path
    pub output: String,
    /// FFT (frame) size in samples
    pub fft_size: usize,
    /// Whether A-weighting was applied
    pub weighting: bool,
    /// Sample rate shared by all files (Hz)
    pub sample_rate: u32,
    /// Number of modulator frames searched
    pub corpus_frames: usize,
    /// Number of carrier frames resynthesized
    pub carrier_frames: usize,
    /// Number of samples written
    pub output_samples: usize,
    /// BLAKE3 hash of the output samples
    pub pcm_hash: String,
}

/// Top-level JSON document for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MosaicOutput {
    /// Whether the run succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Run details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MosaicReport>,
}

impl MosaicOutput {
    /// Creates a successful output.
    pub fn success(result: MosaicReport) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}
