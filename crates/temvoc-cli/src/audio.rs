//! WAV loading and writing for the mosaicing command.
//!
//! Input must be mono. Integer PCM (8, 16, 24 or 32 bit) is normalized to
//! [-1.0, 1.0] by the bit depth's full scale; 32-bit float is read as-is.
//! Output is written in the carrier's own format.

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;
use temvoc_core::SampleBuffer;

use crate::commands::json_output::error_codes;

/// Errors from reading or writing audio files.
#[derive(Debug, Error)]
pub enum AudioIoError {
    /// File could not be opened or parsed as WAV.
    #[error("could not load '{}' - {source}", path.display())]
    Open {
        /// File path.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: hound::Error,
    },

    /// File has more than one channel.
    #[error("input audio files must be mono: '{}' has {channels} channels", path.display())]
    NotMono {
        /// File path.
        path: PathBuf,
        /// Channel count found.
        channels: u16,
    },

    /// Sample format or bit depth the loader does not handle.
    #[error("unsupported sample format in '{}': {format:?} with {bits} bits", path.display())]
    UnsupportedFormat {
        /// File path.
        path: PathBuf,
        /// Sample format.
        format: hound::SampleFormat,
        /// Bits per sample.
        bits: u16,
    },

    /// Sample data could not be decoded.
    #[error("failed to read samples from '{}': {source}", path.display())]
    Decode {
        /// File path.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: hound::Error,
    },

    /// Output file could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: hound::Error,
    },
}

impl AudioIoError {
    /// Stable error code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            AudioIoError::Open { .. } | AudioIoError::Decode { .. } => error_codes::FILE_READ,
            AudioIoError::NotMono { .. } => error_codes::NOT_MONO,
            AudioIoError::UnsupportedFormat { .. } => error_codes::UNSUPPORTED_FORMAT,
            AudioIoError::Write { .. } => error_codes::FILE_WRITE,
        }
    }

    /// Path of the file involved.
    pub fn path(&self) -> &Path {
        match self {
            AudioIoError::Open { path, .. }
            | AudioIoError::NotMono { path, .. }
            | AudioIoError::UnsupportedFormat { path, .. }
            | AudioIoError::Decode { path, .. }
            | AudioIoError::Write { path, .. } => path,
        }
    }
}

/// A decoded mono file together with its on-disk format.
#[derive(Debug, Clone)]
pub struct LoadedAudio {
    /// Normalized samples and sample rate.
    pub buffer: SampleBuffer,
    /// Format of the source file.
    pub spec: hound::WavSpec,
}

/// Loads a mono WAV file.
pub fn load_mono(path: &Path) -> Result<LoadedAudio, AudioIoError> {
    let mut reader = hound::WavReader::open(path).map_err(|source| AudioIoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(AudioIoError::NotMono {
            path: path.to_path_buf(),
            channels: spec.channels,
        });
    }

    let decode = |source| AudioIoError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(decode)?,
        (hound::SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let scale = full_scale(bits);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v as f64 / scale) as f32))
                .collect::<Result<_, _>>()
                .map_err(decode)?
        }
        (format, bits) => {
            return Err(AudioIoError::UnsupportedFormat {
                path: path.to_path_buf(),
                format,
                bits,
            })
        }
    };

    Ok(LoadedAudio {
        buffer: SampleBuffer::new(samples, spec.sample_rate),
        spec,
    })
}

/// Writes mono samples using the sample rate and format of `like`.
///
/// Integer formats are clipped to [-1.0, 1.0] before conversion. The file is
/// staged next to `path` and renamed into place once complete, so a failed
/// write leaves no partial file behind.
pub fn write_like(path: &Path, samples: &[f32], like: &hound::WavSpec) -> Result<(), AudioIoError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: like.sample_rate,
        bits_per_sample: like.bits_per_sample,
        sample_format: like.sample_format,
    };
    let write_err = |source| AudioIoError::Write {
        path: path.to_path_buf(),
        source,
    };
    let io_err = |e: io::Error| write_err(hound::Error::IoError(e));

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".temvoc-").suffix(".wav");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Temp files default to owner-only; output should look like any other file.
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut staged = builder.tempfile_in(dir).map_err(io_err)?;

    {
        let mut writer = hound::WavWriter::new(BufWriter::new(staged.as_file_mut()), spec)
            .map_err(write_err)?;

        match spec.sample_format {
            hound::SampleFormat::Float => {
                for &sample in samples {
                    writer.write_sample(sample).map_err(write_err)?;
                }
            }
            hound::SampleFormat::Int => {
                let max = full_scale(spec.bits_per_sample) - 1.0;
                for &sample in samples {
                    let value = (sample.clamp(-1.0, 1.0) as f64 * max).round() as i32;
                    writer.write_sample(value).map_err(write_err)?;
                }
            }
        }

        writer.finalize().map_err(write_err)?;
    }

    staged.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

/// BLAKE3 hex digest of the samples as little-endian `f32` bytes.
pub fn pcm_hash(samples: &[f32]) -> String {
    let mut hasher = blake3::Hasher::new();
    for sample in samples {
        hasher.update(&sample.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Largest magnitude of a signed integer sample of `bits` bits.
fn full_scale(bits: u16) -> f64 {
    (1u64 << (bits.clamp(1, 32) - 1)) as f64
}
