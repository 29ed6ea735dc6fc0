//! Weighted spectral distance and exhaustive nearest-frame search.

use crate::analysis::Spectrum;
use crate::error::{MosaicError, MosaicResult};
use crate::weighting::WeightingEnvelope;

/// Nearest corpus entry for one target spectrum.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// Position of the entry in the corpus.
    pub index: usize,
    /// The matched spectrum, borrowed from the corpus.
    pub spectrum: &'a Spectrum,
    /// Weighted distance to the target.
    pub distance: f64,
}

/// Compares spectra under a fixed weighting envelope.
#[derive(Debug, Clone)]
pub struct SpectralMatcher {
    envelope: WeightingEnvelope,
}

impl SpectralMatcher {
    /// Creates a matcher that owns the envelope for the run.
    pub fn new(envelope: WeightingEnvelope) -> Self {
        Self { envelope }
    }

    /// `sum_k w[k] * |mag(a[k]) - mag(b[k])|`.
    pub fn distance(&self, a: &Spectrum, b: &Spectrum) -> MosaicResult<f64> {
        self.check_len(a)?;
        self.check_len(b)?;
        Ok(weighted_distance(
            a.magnitudes(),
            b.magnitudes(),
            self.envelope.as_slice(),
        ))
    }

    /// Finds the corpus entry closest to `target`.
    ///
    /// Ties go to the earliest entry. Fails on an empty corpus.
    pub fn find_closest<'a>(
        &self,
        target: &Spectrum,
        corpus: &'a [Spectrum],
    ) -> MosaicResult<Match<'a>> {
        self.check_len(target)?;

        let (first, rest) = corpus.split_first().ok_or(MosaicError::EmptyCorpus {
            frame_size: (self.envelope.len().saturating_sub(1)) * 2,
        })?;
        self.check_len(first)?;

        let weights = self.envelope.as_slice();
        let mut best = Match {
            index: 0,
            spectrum: first,
            distance: weighted_distance(target.magnitudes(), first.magnitudes(), weights),
        };

        for (i, candidate) in rest.iter().enumerate() {
            self.check_len(candidate)?;
            let distance = weighted_distance(target.magnitudes(), candidate.magnitudes(), weights);
            if distance < best.distance {
                best = Match {
                    index: i + 1,
                    spectrum: candidate,
                    distance,
                };
            }
        }

        Ok(best)
    }

    fn check_len(&self, spectrum: &Spectrum) -> MosaicResult<()> {
        if spectrum.len() != self.envelope.len() {
            return Err(MosaicError::SpectrumSize {
                expected: self.envelope.len(),
                found: spectrum.len(),
            });
        }
        Ok(())
    }
}

/// Weighted L1 distance between two magnitude sequences of equal length.
#[inline]
pub fn weighted_distance(a: &[f64], b: &[f64], weights: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .zip(weights)
        .map(|((x, y), w)| w * (x - y).abs())
        .sum()
}
