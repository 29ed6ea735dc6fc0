//! Inverse transform and windowed overlap-add.
//!
//! Each matched spectrum is inverse-transformed, scaled by `1 / frame_size`,
//! shaped by a Hann window and summed into the output at the carrier frame's
//! offset. No overlap gain correction is applied afterwards.

use std::f64::consts::PI;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::analysis::Spectrum;
use crate::error::{MosaicError, MosaicResult};

/// Hann window value at `index` for a window of `size` samples.
///
/// Uses the symmetric form, zero at both ends.
#[inline]
pub fn hann_window(index: usize, size: usize) -> f64 {
    0.5 * (1.0 - (2.0 * PI * index as f64 / (size as f64 - 1.0)).cos())
}

/// Turns half spectra back into windowed time-domain frames.
pub struct Resynthesizer {
    frame_size: usize,
    ifft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    window: Vec<f32>,
    frame: Vec<f32>,
}

impl Resynthesizer {
    /// Creates a resynthesizer with its own planner.
    pub fn new(frame_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self::with_planner(&mut planner, frame_size)
    }

    /// Creates a resynthesizer from a shared planner.
    pub fn with_planner(planner: &mut FftPlanner<f32>, frame_size: usize) -> Self {
        let ifft = planner.plan_fft_inverse(frame_size);
        let scratch = vec![Complex::new(0.0, 0.0); ifft.get_inplace_scratch_len()];
        let window = (0..frame_size)
            .map(|i| hann_window(i, frame_size) as f32)
            .collect();
        Self {
            frame_size,
            ifft,
            buffer: vec![Complex::new(0.0, 0.0); frame_size],
            scratch,
            window,
            frame: vec![0.0; frame_size],
        }
    }

    /// Inverse-transforms, normalizes and windows one spectrum.
    ///
    /// The returned frame is valid until the next call.
    pub fn synthesize(&mut self, spectrum: &Spectrum) -> MosaicResult<&[f32]> {
        let n = self.frame_size;
        let half = n / 2;
        let bins = spectrum.bins();
        if bins.len() != half + 1 {
            return Err(MosaicError::SpectrumSize {
                expected: half + 1,
                found: bins.len(),
            });
        }

        // Rebuild the full conjugate-symmetric spectrum. DC and Nyquist are
        // real for a real signal, so their imaginary parts are dropped.
        self.buffer[0] = Complex::new(bins[0].re, 0.0);
        self.buffer[half] = Complex::new(bins[half].re, 0.0);
        for k in 1..half {
            self.buffer[k] = bins[k];
            self.buffer[n - k] = bins[k].conj();
        }

        self.ifft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let scale = 1.0 / n as f32;
        for ((out, c), w) in self.frame.iter_mut().zip(&self.buffer).zip(&self.window) {
            *out = c.re * scale * w;
        }

        Ok(&self.frame)
    }

    /// Synthesizes `spectrum` and adds it into `output` at `offset`.
    pub fn overlap_add(
        &mut self,
        spectrum: &Spectrum,
        output: &mut OutputAccumulator,
        offset: usize,
    ) -> MosaicResult<()> {
        let frame = self.synthesize(spectrum)?;
        output.add_frame(offset, frame);
        Ok(())
    }
}

/// Zero-initialized overlap-add buffer, one frame longer than the output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputAccumulator {
    samples: Vec<f32>,
    output_len: usize,
}

impl OutputAccumulator {
    /// Allocates `output_len + frame_size` zeros.
    pub fn new(output_len: usize, frame_size: usize) -> Self {
        Self {
            samples: vec![0.0; output_len + frame_size],
            output_len,
        }
    }

    /// Adds `frame` into `[offset, offset + frame.len())`.
    ///
    /// Callers keep `offset + frame.len()` within the accumulator; frames
    /// start at valid carrier offsets, so this holds by construction.
    pub fn add_frame(&mut self, offset: usize, frame: &[f32]) {
        let target = &mut self.samples[offset..offset + frame.len()];
        for (acc, &s) in target.iter_mut().zip(frame) {
            *acc += s;
        }
    }

    /// Full accumulator contents, including the trailing frame of headroom.
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Truncates to the output length and returns the samples.
    pub fn into_output(mut self) -> Vec<f32> {
        self.samples.truncate(self.output_len);
        self.samples
    }
}
