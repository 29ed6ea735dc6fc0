//! Test signals and WAV fixtures.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

/// Deterministic white noise in [-1, 1).
pub fn noise(len: usize, seed: u32) -> Vec<f32> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
        })
        .collect()
}

/// Sine tone at `freq` Hz with the given amplitude.
pub fn sine(len: usize, freq: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin() * amplitude)
        .collect()
}

/// Sine whose frequency sweeps linearly from `start` to `end` Hz.
pub fn sweep(len: usize, start: f32, end: f32, sample_rate: u32) -> Vec<f32> {
    let mut phase = 0.0f32;
    (0..len)
        .map(|i| {
            let t = i as f32 / len.max(1) as f32;
            let freq = start + (end - start) * t;
            phase += 2.0 * PI * freq / sample_rate as f32;
            phase.sin() * 0.5
        })
        .collect()
}

/// Mono WAV format description used by the fixture writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// 16-bit signed integer PCM.
    Pcm16,
    /// 24-bit signed integer PCM.
    Pcm24,
    /// 32-bit IEEE float.
    Float32,
}

impl WavFormat {
    /// hound spec for a file of this format.
    pub fn spec(self, sample_rate: u32, channels: u16) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            WavFormat::Pcm16 => (16, hound::SampleFormat::Int),
            WavFormat::Pcm24 => (24, hound::SampleFormat::Int),
            WavFormat::Float32 => (32, hound::SampleFormat::Float),
        };
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Writes a WAV file; multi-channel data is interleaved.
pub fn write_wav(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
    channels: u16,
    format: WavFormat,
) -> PathBuf {
    let spec = format.spec(sample_rate, channels);
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV file");
    for &s in samples {
        match format {
            WavFormat::Float32 => writer.write_sample(s).expect("Failed to write sample"),
            WavFormat::Pcm16 => writer
                .write_sample((s.clamp(-1.0, 1.0) * 32767.0).round() as i16)
                .expect("Failed to write sample"),
            WavFormat::Pcm24 => writer
                .write_sample((s.clamp(-1.0, 1.0) * 8_388_607.0).round() as i32)
                .expect("Failed to write sample"),
        }
    }
    writer.finalize().expect("Failed to finalize WAV file");
    path.to_path_buf()
}

/// Reads every sample of a WAV file as `f32` together with its spec.
pub fn read_wav(path: &Path) -> (Vec<f32>, hound::WavSpec) {
    let loaded = temvoc_cli::audio::load_mono(path).expect("Failed to read WAV file");
    (loaded.buffer.samples, loaded.spec)
}
