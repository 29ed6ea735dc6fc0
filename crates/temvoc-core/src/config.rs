//! Engine configuration.

use crate::error::{MosaicError, MosaicResult};

/// Smallest supported analysis frame size (samples).
pub const MIN_FRAME_SIZE: usize = 64;

/// Largest supported analysis frame size (samples).
pub const MAX_FRAME_SIZE: usize = 8192;

/// Frame size used when none is given.
pub const DEFAULT_FRAME_SIZE: usize = 1024;

/// Mosaicing parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Analysis/synthesis frame size in samples (power of two).
    pub frame_size: usize,

    /// Apply A-weighting to the spectral distance.
    pub use_weighting: bool,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            use_weighting: false,
        }
    }
}

impl MosaicConfig {
    /// Creates a configuration.
    pub fn new(frame_size: usize, use_weighting: bool) -> Self {
        Self {
            frame_size,
            use_weighting,
        }
    }

    /// Stride between consecutive frame offsets (50% overlap).
    pub fn hop(&self) -> usize {
        self.frame_size / 2
    }

    /// Number of bins in a half spectrum, DC through Nyquist.
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Checks the frame size is a power of two within bounds.
    pub fn validate(&self) -> MosaicResult<()> {
        validate_frame_size(self.frame_size)
    }
}

/// Checks a frame size is a power of two in `[MIN_FRAME_SIZE, MAX_FRAME_SIZE]`.
pub fn validate_frame_size(size: usize) -> MosaicResult<()> {
    if !(MIN_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&size) || !size.is_power_of_two() {
        return Err(MosaicError::InvalidFrameSize {
            size,
            min: MIN_FRAME_SIZE,
            max: MAX_FRAME_SIZE,
        });
    }
    Ok(())
}
