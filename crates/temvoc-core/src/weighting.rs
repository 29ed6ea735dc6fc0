//! Perceptual weighting of spectral bins.
//!
//! The envelope is built once per run and scales each bin's contribution to
//! the spectral distance. With weighting disabled every bin counts equally.

use std::ops::Index;

/// Per-bin weights, DC through Nyquist.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingEnvelope {
    weights: Vec<f64>,
}

impl WeightingEnvelope {
    /// Builds the envelope for `frame_size / 2 + 1` bins.
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `frame_size` - Analysis frame size in samples
    /// * `use_weighting` - A-weighting if true, uniform 1.0 otherwise
    pub fn build(sample_rate: u32, frame_size: usize, use_weighting: bool) -> Self {
        let num_bins = frame_size / 2 + 1;
        if !use_weighting {
            return Self::uniform(num_bins);
        }

        let bin_hz = sample_rate as f64 / frame_size as f64;
        let weights = (0..num_bins)
            .map(|k| a_weighting(k as f64 * bin_hz))
            .collect();
        Self { weights }
    }

    /// An envelope of `num_bins` ones.
    pub fn uniform(num_bins: usize) -> Self {
        Self {
            weights: vec![1.0; num_bins],
        }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the envelope has no bins.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weights as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

impl Index<usize> for WeightingEnvelope {
    type Output = f64;

    fn index(&self, bin: usize) -> &f64 {
        &self.weights[bin]
    }
}

/// Unnormalized A-weighting gain at frequency `f` (Hz).
pub fn a_weighting(f: f64) -> f64 {
    let f2 = f * f;
    12200.0_f64.powi(2) * f2 * f2
        / ((f2 + 20.6_f64.powi(2))
            * (f2 + 12200.0_f64.powi(2))
            * ((f2 + 107.7_f64.powi(2)) * (f2 + 737.9_f64.powi(2))).sqrt())
}
