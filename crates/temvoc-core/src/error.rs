//! Error types for the mosaicing engine.

use thiserror::Error;

/// Result type for engine operations.
pub type MosaicResult<T> = Result<T, MosaicError>;

/// Errors that can occur while building or running a mosaic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MosaicError {
    /// Frame size is not a power of two in the supported range.
    #[error("invalid frame size {size}: must be a power of two between {min} and {max}")]
    InvalidFrameSize {
        /// The rejected frame size.
        size: usize,
        /// Smallest supported frame size.
        min: usize,
        /// Largest supported frame size.
        max: usize,
    },

    /// Sample rate of zero.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Carrier and modulator were recorded at different rates.
    #[error("carrier and modulator sample rates must match ({carrier} Hz vs {modulator} Hz)")]
    SampleRateMismatch {
        /// Carrier sample rate.
        carrier: u32,
        /// Modulator sample rate.
        modulator: u32,
    },

    /// Modulator too short to yield a single analysis frame.
    #[error("modulator is shorter than one {frame_size}-sample frame; no spectra to match against")]
    EmptyCorpus {
        /// Frame size in use.
        frame_size: usize,
    },

    /// A frame handed to the analyzer has the wrong length.
    #[error("frame length mismatch: expected {expected} samples, found {found}")]
    FrameLength {
        /// Expected sample count.
        expected: usize,
        /// Actual sample count.
        found: usize,
    },

    /// Two spectral sequences of different bin counts were compared.
    #[error("spectrum size mismatch: expected {expected} bins, found {found}")]
    SpectrumSize {
        /// Expected bin count.
        expected: usize,
        /// Actual bin count.
        found: usize,
    },
}

impl MosaicError {
    /// Stable error code for machine-readable reporting.
    pub fn code(&self) -> &'static str {
        match self {
            MosaicError::InvalidFrameSize { .. } => "TEMVOC_001",
            MosaicError::InvalidSampleRate { .. } => "TEMVOC_002",
            MosaicError::SampleRateMismatch { .. } => "TEMVOC_003",
            MosaicError::EmptyCorpus { .. } => "TEMVOC_004",
            MosaicError::SpectrumSize { .. } => "TEMVOC_005",
            MosaicError::FrameLength { .. } => "TEMVOC_006",
        }
    }

    /// Error category, used to group related errors.
    pub fn category(&self) -> &'static str {
        match self {
            MosaicError::InvalidFrameSize { .. }
            | MosaicError::InvalidSampleRate { .. }
            | MosaicError::SampleRateMismatch { .. } => "configuration",
            MosaicError::EmptyCorpus { .. } => "corpus",
            MosaicError::SpectrumSize { .. } | MosaicError::FrameLength { .. } => "internal",
        }
    }
}
