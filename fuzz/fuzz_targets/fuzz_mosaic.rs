#![no_main]

use libfuzzer_sys::fuzz_target;
use temvoc_core::{mosaic, MosaicConfig, MosaicError, SampleBuffer};

// Layout: [size byte, weighting byte, split byte, i16 samples...]
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let frame_size = 64usize << (data[0] % 4);
    let use_weighting = data[1] & 1 == 1;

    let samples: Vec<f32> = data[3..]
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect();
    let split = samples.len() * data[2] as usize / 255;
    let carrier = SampleBuffer::new(samples[..split].to_vec(), 22050);
    let modulator = SampleBuffer::new(samples[split..].to_vec(), 22050);

    match mosaic(
        MosaicConfig::new(frame_size, use_weighting),
        &carrier,
        &modulator,
    ) {
        Ok(output) => {
            assert_eq!(output.len(), carrier.len());
            assert!(output.iter().all(|s| s.is_finite()));
        }
        Err(MosaicError::EmptyCorpus { .. }) => assert!(modulator.len() < frame_size),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
