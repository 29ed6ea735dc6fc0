//! End-to-end tests for the mosaic command.
//!
//! Each test writes WAV inputs into a temp dir, runs the command in-process
//! and inspects the written file and the returned report.

use clap::Parser;
use pretty_assertions::assert_eq;
use temvoc_cli::cli_args::Cli;
use temvoc_cli::commands::json_output::{error_codes, MosaicOutput};
use temvoc_cli::commands::mosaic::{build_engine, load_inputs, RunError};
use temvoc_core::MosaicError;
use temvoc_tests::fixtures::{noise, read_wav, sine, sweep, WavFormat};
use temvoc_tests::harness::{arg, TestHarness};

const RATE: u32 = 22050;

#[test]
fn test_output_matches_carrier_length_and_format() {
    let harness = TestHarness::new();
    let carrier = harness.wav(
        "carrier.wav",
        &sweep(5000, 200.0, 4000.0, RATE),
        RATE,
        1,
        WavFormat::Pcm24,
    );
    let modulator = harness.mono_wav("modulator.wav", &noise(4096, 7), RATE);
    let output = harness.file("out.wav");

    let report = harness
        .run(&["-f", "256", arg(&carrier), arg(&modulator), arg(&output)])
        .expect("run should succeed");

    let (samples, spec) = read_wav(&output);
    assert_eq!(samples.len(), 5000);
    assert_eq!(spec.bits_per_sample, 24);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(spec.sample_rate, RATE);
    assert_eq!(spec.channels, 1);

    assert_eq!(report.output_samples, 5000);
    assert_eq!(report.fft_size, 256);
    assert!(!report.weighting);
    assert_eq!(report.sample_rate, RATE);
    // (4096 - 256) / 128 + 1
    assert_eq!(report.corpus_frames, 31);
    // (5000 - 256) / 128 + 1
    assert_eq!(report.carrier_frames, 38);
}

#[test]
fn test_float_carrier_gives_float_output() {
    let harness = TestHarness::new();
    let carrier = harness.wav(
        "carrier.wav",
        &sine(2048, 440.0, RATE, 0.5),
        RATE,
        1,
        WavFormat::Float32,
    );
    let modulator = harness.mono_wav("modulator.wav", &noise(2048, 3), RATE);
    let output = harness.file("out.wav");

    harness
        .run(&[
            "-w",
            "--fft-size",
            "512",
            arg(&carrier),
            arg(&modulator),
            arg(&output),
        ])
        .expect("run should succeed");

    let (samples, spec) = read_wav(&output);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(samples.len(), 2048);
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|s| *s != 0.0));
}

#[test]
fn test_silent_modulator_gives_silent_output() {
    let harness = TestHarness::new();
    let carrier = harness.mono_wav("carrier.wav", &noise(3000, 11), RATE);
    let modulator = harness.mono_wav("modulator.wav", &vec![0.0; 2048], RATE);
    let output = harness.file("out.wav");

    harness
        .run(&["-f", "128", arg(&carrier), arg(&modulator), arg(&output)])
        .expect("run should succeed");

    let (samples, _) = read_wav(&output);
    assert_eq!(samples.len(), 3000);
    assert!(samples.iter().all(|s| *s == 0.0));
}

#[test]
fn test_short_carrier_gives_silent_output() {
    let harness = TestHarness::new();
    let carrier = harness.mono_wav("carrier.wav", &noise(100, 1), RATE);
    let modulator = harness.mono_wav("modulator.wav", &noise(4096, 2), RATE);
    let output = harness.file("out.wav");

    let report = harness
        .run(&["-f", "256", arg(&carrier), arg(&modulator), arg(&output)])
        .expect("run should succeed");

    assert_eq!(report.carrier_frames, 0);
    let (samples, _) = read_wav(&output);
    assert_eq!(samples, vec![0.0; 100]);
}

#[test]
fn test_short_modulator_fails_without_output() {
    let harness = TestHarness::new();
    let carrier = harness.mono_wav("carrier.wav", &noise(4096, 1), RATE);
    let modulator = harness.mono_wav("modulator.wav", &noise(500, 2), RATE);
    let output = harness.file("out.wav");

    let err = harness
        .run(&["-f", "1024", arg(&carrier), arg(&modulator), arg(&output)])
        .unwrap_err();

    assert!(matches!(
        err,
        RunError::Mosaic(MosaicError::EmptyCorpus { frame_size: 1024 })
    ));
    assert_eq!(err.to_json().code, "TEMVOC_004");
    assert!(!output.exists());
}

#[test]
fn test_stereo_input_rejected() {
    let harness = TestHarness::new();
    let carrier = harness.wav(
        "stereo.wav",
        &noise(4096, 1),
        RATE,
        2,
        WavFormat::Pcm16,
    );
    let modulator = harness.mono_wav("modulator.wav", &noise(4096, 2), RATE);
    let output = harness.file("out.wav");

    let err = harness
        .run(&[arg(&carrier), arg(&modulator), arg(&output)])
        .unwrap_err();

    let json = err.to_json();
    assert_eq!(json.code, error_codes::NOT_MONO);
    assert!(json.file.unwrap().ends_with("stereo.wav"));
    assert!(!output.exists());
}

#[test]
fn test_sample_rate_mismatch_rejected() {
    let harness = TestHarness::new();
    let carrier = harness.mono_wav("carrier.wav", &noise(4096, 1), 44100);
    let modulator = harness.mono_wav("modulator.wav", &noise(4096, 2), RATE);
    let output = harness.file("out.wav");

    let err = harness
        .run(&[arg(&carrier), arg(&modulator), arg(&output)])
        .unwrap_err();

    assert!(matches!(
        err,
        RunError::SampleRateMismatch {
            carrier: 44100,
            modulator: 22050
        }
    ));
    assert_eq!(err.to_json().code, error_codes::SAMPLE_RATE_MISMATCH);
    assert!(!output.exists());
}

#[test]
fn test_missing_input_reports_file() {
    let harness = TestHarness::new();
    let modulator = harness.mono_wav("modulator.wav", &noise(4096, 2), RATE);
    let missing = harness.file("missing.wav");
    let output = harness.file("out.wav");

    let err = harness
        .run(&[arg(&missing), arg(&modulator), arg(&output)])
        .unwrap_err();

    let json = err.to_json();
    assert_eq!(json.code, error_codes::FILE_READ);
    assert!(json.file.unwrap().ends_with("missing.wav"));
}

#[test]
fn test_invalid_fft_sizes_rejected_by_parser() {
    for size in ["32", "100", "16384", "abc"] {
        let result = Cli::try_parse_from(["temvoc", "-f", size, "a.wav", "b.wav", "c.wav"]);
        assert!(result.is_err(), "size {} should be rejected", size);
    }
}

#[test]
fn test_default_fft_size_is_1024() {
    let harness = TestHarness::new();
    let cli = harness.parse(&["a.wav", "b.wav", "c.wav"]);
    assert_eq!(cli.fft_size, 1024);
    assert!(!cli.weighting);
}

#[test]
fn test_report_serializes_as_json_document() {
    let harness = TestHarness::new();
    let carrier = harness.mono_wav("carrier.wav", &noise(2048, 5), RATE);
    let modulator = harness.mono_wav("modulator.wav", &noise(2048, 6), RATE);
    let output = harness.file("out.wav");

    let report = harness
        .run(&["-f", "256", arg(&carrier), arg(&modulator), arg(&output)])
        .expect("run should succeed");

    let json = serde_json::to_value(MosaicOutput::success(report.clone())).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    assert_eq!(json["result"]["fft_size"], 256);
    assert_eq!(json["result"]["pcm_hash"], report.pcm_hash.as_str());

    let parsed: MosaicOutput = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.result, Some(report));
}

#[test]
fn test_header_frame_counts_match_report() {
    let harness = TestHarness::new();
    let carrier = harness.mono_wav("carrier.wav", &noise(3000, 12), RATE);
    let modulator = harness.mono_wav("modulator.wav", &noise(5000, 13), RATE);
    let output = harness.file("out.wav");
    let cli = harness.parse(&["-f", "512", arg(&carrier), arg(&modulator), arg(&output)]);

    let inputs = load_inputs(&cli).expect("inputs should load");
    let engine = build_engine(&cli, &inputs).expect("engine should build");
    // (5000 - 512) / 256 + 1 and (3000 - 512) / 256 + 1
    assert_eq!(engine.corpus_frame_count(), 18);
    assert_eq!(engine.carrier_frame_count(), 10);

    let report = harness
        .run(&["-f", "512", arg(&carrier), arg(&modulator), arg(&output)])
        .expect("run should succeed");
    assert_eq!(report.corpus_frames, engine.corpus_frame_count());
    assert_eq!(report.carrier_frames, engine.carrier_frame_count());
}

#[test]
fn test_failed_run_leaves_no_stray_files() {
    let harness = TestHarness::new();
    let carrier = harness.mono_wav("carrier.wav", &noise(4096, 1), RATE);
    let modulator = harness.mono_wav("modulator.wav", &noise(4096, 2), RATE);
    // A directory where the output file should go.
    let output = harness.file("out.wav");
    std::fs::create_dir(&output).unwrap();

    let err = harness
        .run(&["-f", "256", arg(&carrier), arg(&modulator), arg(&output)])
        .unwrap_err();

    assert_eq!(err.to_json().code, error_codes::FILE_WRITE);
    let mut names: Vec<String> = std::fs::read_dir(harness.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["carrier.wav", "modulator.wav", "out.wav"]);
}
