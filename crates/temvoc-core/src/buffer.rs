//! Mono sample buffers and frame iteration.

/// A mono sequence of samples with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// Samples, typically normalized to [-1, 1].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl SampleBuffer {
    /// Creates a buffer from samples and a sample rate.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns `size` samples starting at `offset`, or `None` past the end.
    pub fn frame(&self, offset: usize, size: usize) -> Option<&[f32]> {
        let end = offset.checked_add(size)?;
        self.samples.get(offset..end)
    }

    /// Start offsets of every complete frame, spaced by `hop`.
    pub fn frame_offsets(&self, frame_size: usize, hop: usize) -> FrameOffsets {
        FrameOffsets::new(self.samples.len(), frame_size, hop)
    }
}

/// Iterator over the start offsets `0, hop, 2*hop, ...` of complete frames.
#[derive(Debug, Clone)]
pub struct FrameOffsets {
    next: usize,
    len: usize,
    frame_size: usize,
    hop: usize,
}

impl FrameOffsets {
    /// Offsets for a buffer of `len` samples.
    pub fn new(len: usize, frame_size: usize, hop: usize) -> Self {
        Self {
            next: 0,
            len,
            frame_size,
            hop: hop.max(1),
        }
    }

    /// Number of complete frames that fit in `len` samples.
    pub fn count_for(len: usize, frame_size: usize, hop: usize) -> usize {
        if frame_size == 0 || len < frame_size {
            return 0;
        }
        (len - frame_size) / hop.max(1) + 1
    }
}

impl Iterator for FrameOffsets {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next + self.frame_size > self.len {
            return None;
        }
        let offset = self.next;
        self.next += self.hop;
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = FrameOffsets::count_for(
            self.len.saturating_sub(self.next),
            self.frame_size,
            self.hop,
        );
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameOffsets {}
