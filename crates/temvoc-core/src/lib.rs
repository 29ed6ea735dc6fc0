//! temvoc core
//!
//! Spectral cross-synthesis ("audio mosaicing") between two mono signals.
//!
//! # Overview
//!
//! For every half-overlapping frame of the *carrier*, the engine finds the
//! *modulator* frame whose magnitude spectrum is closest to it and resynthesizes
//! the output from that modulator frame by windowed overlap-add. The carrier
//! keeps its timing; the modulator supplies the sound.
//!
//! - **Analysis** - frames are forward transformed without an analysis window
//! - **Matching** - weighted L1 distance between magnitude spectra, optionally
//!   A-weighted, with an exhaustive search over every modulator frame
//! - **Resynthesis** - inverse transform of the matched frame (its own phase),
//!   scaled by `1 / frame_size`, Hann-windowed and overlap-added at the
//!   carrier frame's offset
//!
//! # Determinism
//!
//! The pipeline is single-threaded and free of randomness. Identical inputs
//! produce bit-identical output buffers, and ties between equally close
//! modulator frames always resolve to the earliest one.
//!
//! # Example
//!
//! ```
//! use temvoc_core::{MosaicConfig, MosaicEngine, SampleBuffer};
//!
//! let carrier = SampleBuffer::new(vec![0.0; 4096], 44100);
//! let modulator = SampleBuffer::new(vec![0.1; 4096], 44100);
//!
//! let engine = MosaicEngine::new(MosaicConfig::new(1024, true), &carrier, &modulator)?;
//! let mosaic = engine.process(|fraction| eprint!("\r{:.0}%", fraction * 100.0))?;
//! assert_eq!(mosaic.samples.len(), carrier.len());
//! # Ok::<(), temvoc_core::MosaicError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`engine`] - Orchestrates a full run
//! - [`analysis`] - Framing, forward FFT and the modulator corpus
//! - [`weighting`] - Per-bin perceptual weights
//! - [`matcher`] - Spectral distance and nearest-frame search
//! - [`resynth`] - Inverse FFT, Hann window and overlap-add
//! - [`buffer`] - Sample buffers and frame offsets
//! - [`config`] - Frame size and weighting settings

pub mod analysis;
pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod resynth;
pub mod weighting;

// Re-export main types at crate root
pub use analysis::{ModulatorCorpus, SpectralAnalyzer, Spectrum};
pub use buffer::{FrameOffsets, SampleBuffer};
pub use config::{
    validate_frame_size, MosaicConfig, DEFAULT_FRAME_SIZE, MAX_FRAME_SIZE, MIN_FRAME_SIZE,
};
pub use engine::{mosaic, Mosaic, MosaicEngine};
pub use error::{MosaicError, MosaicResult};
pub use matcher::{Match, SpectralMatcher};
pub use resynth::{hann_window, OutputAccumulator, Resynthesizer};
pub use weighting::{a_weighting, WeightingEnvelope};
