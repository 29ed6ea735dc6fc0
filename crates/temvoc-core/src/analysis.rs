//! Short-time spectral analysis.
//!
//! Frames are transformed as-is: no analysis window is applied before the
//! forward FFT. Only the synthesis side is windowed (see [`crate::resynth`]).

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::buffer::SampleBuffer;
use crate::error::{MosaicError, MosaicResult};

/// Half spectrum of one real-valued frame, DC through Nyquist.
///
/// Magnitudes are computed once at construction since every distance
/// evaluation reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex<f32>>,
    magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Creates a spectrum from `frame_size / 2 + 1` complex bins.
    pub fn from_bins(bins: Vec<Complex<f32>>) -> Self {
        let magnitudes = bins.iter().map(|c| magnitude(*c)).collect();
        Self { bins, magnitudes }
    }

    /// Complex bins.
    pub fn bins(&self) -> &[Complex<f32>] {
        &self.bins
    }

    /// Bin magnitudes, `sqrt(re^2 + im^2)`.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Magnitude of a complex bin.
#[inline]
pub fn magnitude(c: Complex<f32>) -> f64 {
    let re = c.re as f64;
    let im = c.im as f64;
    (re * re + im * im).sqrt()
}

/// Forward real-to-half-spectrum transform for a fixed frame size.
pub struct SpectralAnalyzer {
    frame_size: usize,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectralAnalyzer {
    /// Creates an analyzer with its own planner.
    pub fn new(frame_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self::with_planner(&mut planner, frame_size)
    }

    /// Creates an analyzer from a shared planner.
    pub fn with_planner(planner: &mut FftPlanner<f32>, frame_size: usize) -> Self {
        let fft = planner.plan_fft_forward(frame_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        Self {
            frame_size,
            fft,
            buffer: vec![Complex::new(0.0, 0.0); frame_size],
            scratch,
        }
    }

    /// Frame size this analyzer was planned for.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Transforms one frame into its half spectrum.
    pub fn analyze(&mut self, frame: &[f32]) -> MosaicResult<Spectrum> {
        if frame.len() != self.frame_size {
            return Err(MosaicError::FrameLength {
                expected: self.frame_size,
                found: frame.len(),
            });
        }

        for (slot, &sample) in self.buffer.iter_mut().zip(frame) {
            *slot = Complex::new(sample, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        // Upper half is the conjugate mirror of the lower half for real input.
        Ok(Spectrum::from_bins(
            self.buffer[..self.frame_size / 2 + 1].to_vec(),
        ))
    }
}

/// Spectra of every modulator frame, in offset order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulatorCorpus {
    spectra: Vec<Spectrum>,
}

impl ModulatorCorpus {
    /// Frames the modulator at `0, hop, 2*hop, ...` and analyzes each frame.
    ///
    /// A modulator shorter than one frame yields an empty corpus.
    pub fn build(
        analyzer: &mut SpectralAnalyzer,
        modulator: &SampleBuffer,
        hop: usize,
    ) -> MosaicResult<Self> {
        let frame_size = analyzer.frame_size();
        let offsets = modulator.frame_offsets(frame_size, hop);
        let mut spectra = Vec::with_capacity(offsets.len());

        for offset in offsets {
            if let Some(frame) = modulator.frame(offset, frame_size) {
                spectra.push(analyzer.analyze(frame)?);
            }
        }

        Ok(Self { spectra })
    }

    /// Spectra in offset order.
    pub fn spectra(&self) -> &[Spectrum] {
        &self.spectra
    }

    /// Number of spectra.
    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    /// Returns true if the corpus has no spectra.
    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_bin_count() {
        let mut analyzer = SpectralAnalyzer::new(64);
        let spectrum = analyzer.analyze(&[0.0; 64]).unwrap();
        assert_eq!(spectrum.len(), 33);
        assert_eq!(spectrum.magnitudes().len(), 33);
    }

    #[test]
    fn test_dc_bin_is_sum() {
        let mut analyzer = SpectralAnalyzer::new(64);
        let spectrum = analyzer.analyze(&[0.5; 64]).unwrap();
        assert!((spectrum.bins()[0].re - 32.0).abs() < 1e-4);
        assert!(spectrum.magnitudes()[1..].iter().all(|&m| m < 1e-4));
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let size = 256;
        let frame: Vec<f32> = (0..size)
            .map(|i| (2.0 * PI * 8.0 * i as f32 / size as f32).sin())
            .collect();
        let mut analyzer = SpectralAnalyzer::new(size);
        let spectrum = analyzer.analyze(&frame).unwrap();

        let peak = spectrum
            .magnitudes()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, 8);
        assert!((spectrum.magnitudes()[8] - size as f64 / 2.0).abs() < 1e-2);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let frame: Vec<f32> = (0..128).map(|i| ((i * 37) % 11) as f32 / 11.0).collect();
        let mut analyzer = SpectralAnalyzer::new(128);
        let a = analyzer.analyze(&frame).unwrap();
        let b = analyzer.analyze(&frame).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_wrong_frame_length() {
        let mut analyzer = SpectralAnalyzer::new(64);
        let err = analyzer.analyze(&[0.0; 32]).unwrap_err();
        assert_eq!(
            err,
            MosaicError::FrameLength {
                expected: 64,
                found: 32
            }
        );
    }

    #[test]
    fn test_corpus_frame_count() {
        let mut analyzer = SpectralAnalyzer::new(64);
        let modulator = SampleBuffer::new(vec![0.1; 160], 44100);
        let corpus = ModulatorCorpus::build(&mut analyzer, &modulator, 32).unwrap();
        // offsets 0, 32, 64, 96
        assert_eq!(corpus.len(), 4);
    }

    #[test]
    fn test_short_modulator_gives_empty_corpus() {
        let mut analyzer = SpectralAnalyzer::new(64);
        let modulator = SampleBuffer::new(vec![0.1; 63], 44100);
        let corpus = ModulatorCorpus::build(&mut analyzer, &modulator, 32).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_corpus_preserves_offset_order() {
        let mut analyzer = SpectralAnalyzer::new(64);
        let mut samples = vec![0.0; 64];
        samples.extend(vec![1.0; 64]);
        let modulator = SampleBuffer::new(samples, 44100);
        let corpus = ModulatorCorpus::build(&mut analyzer, &modulator, 32).unwrap();

        let dc: Vec<f32> = corpus.spectra().iter().map(|s| s.bins()[0].re).collect();
        assert_eq!(corpus.len(), 3);
        assert!(dc[0].abs() < 1e-4);
        assert!((dc[1] - 32.0).abs() < 1e-4);
        assert!((dc[2] - 64.0).abs() < 1e-4);
    }
}
