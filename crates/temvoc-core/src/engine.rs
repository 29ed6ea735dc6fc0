//! Mosaicing pipeline: corpus construction, matching and resynthesis.

use rustfft::FftPlanner;

use crate::analysis::{ModulatorCorpus, SpectralAnalyzer};
use crate::buffer::{FrameOffsets, SampleBuffer};
use crate::config::MosaicConfig;
use crate::error::{MosaicError, MosaicResult};
use crate::matcher::SpectralMatcher;
use crate::resynth::{OutputAccumulator, Resynthesizer};
use crate::weighting::WeightingEnvelope;

/// Output of one mosaicing run.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    /// Resynthesized samples, exactly as long as the carrier.
    pub samples: Vec<f32>,
    /// Number of modulator frames in the corpus.
    pub corpus_frames: usize,
    /// Number of carrier frames matched and resynthesized.
    pub carrier_frames: usize,
}

/// One-shot cross-synthesis of a carrier against a modulator.
///
/// The carrier supplies the timeline and the target spectra; the modulator
/// supplies the frames that are actually heard.
#[derive(Debug, Clone)]
pub struct MosaicEngine<'a> {
    config: MosaicConfig,
    carrier: &'a SampleBuffer,
    modulator: &'a SampleBuffer,
}

impl<'a> MosaicEngine<'a> {
    /// Validates the configuration and borrows both inputs.
    pub fn new(
        config: MosaicConfig,
        carrier: &'a SampleBuffer,
        modulator: &'a SampleBuffer,
    ) -> MosaicResult<Self> {
        config.validate()?;
        if carrier.sample_rate == 0 {
            return Err(MosaicError::InvalidSampleRate { rate: 0 });
        }
        if carrier.sample_rate != modulator.sample_rate {
            return Err(MosaicError::SampleRateMismatch {
                carrier: carrier.sample_rate,
                modulator: modulator.sample_rate,
            });
        }
        Ok(Self {
            config,
            carrier,
            modulator,
        })
    }

    /// Number of carrier frames a run will process.
    pub fn carrier_frame_count(&self) -> usize {
        FrameOffsets::count_for(self.carrier.len(), self.config.frame_size, self.config.hop())
    }

    /// Number of modulator frames the corpus will hold.
    pub fn corpus_frame_count(&self) -> usize {
        FrameOffsets::count_for(
            self.modulator.len(),
            self.config.frame_size,
            self.config.hop(),
        )
    }

    /// Runs the full pipeline.
    ///
    /// `on_progress` is called after every carrier frame with
    /// `offset / carrier_len`. A panic inside it aborts the run.
    ///
    /// # Errors
    /// [`MosaicError::EmptyCorpus`] if the modulator is shorter than one frame.
    /// Nothing is returned on error.
    pub fn process<F>(&self, mut on_progress: F) -> MosaicResult<Mosaic>
    where
        F: FnMut(f64),
    {
        let frame_size = self.config.frame_size;
        let hop = self.config.hop();

        let envelope = WeightingEnvelope::build(
            self.carrier.sample_rate,
            frame_size,
            self.config.use_weighting,
        );
        let matcher = SpectralMatcher::new(envelope);

        let mut planner = FftPlanner::new();
        let mut analyzer = SpectralAnalyzer::with_planner(&mut planner, frame_size);
        let mut resynth = Resynthesizer::with_planner(&mut planner, frame_size);

        let corpus = ModulatorCorpus::build(&mut analyzer, self.modulator, hop)?;
        if corpus.is_empty() {
            return Err(MosaicError::EmptyCorpus { frame_size });
        }

        let carrier_len = self.carrier.len();
        let mut output = OutputAccumulator::new(carrier_len, frame_size);
        let mut carrier_frames = 0;

        for offset in self.carrier.frame_offsets(frame_size, hop) {
            let Some(frame) = self.carrier.frame(offset, frame_size) else {
                break;
            };
            let target = analyzer.analyze(frame)?;
            let closest = matcher.find_closest(&target, corpus.spectra())?;
            resynth.overlap_add(closest.spectrum, &mut output, offset)?;
            carrier_frames += 1;

            on_progress(offset as f64 / carrier_len as f64);
        }

        Ok(Mosaic {
            samples: output.into_output(),
            corpus_frames: corpus.len(),
            carrier_frames,
        })
    }
}

/// Convenience wrapper: validates, runs without progress, returns samples.
pub fn mosaic(
    config: MosaicConfig,
    carrier: &SampleBuffer,
    modulator: &SampleBuffer,
) -> MosaicResult<Vec<f32>> {
    let engine = MosaicEngine::new(config, carrier, modulator)?;
    Ok(engine.process(|_| {})?.samples)
}
