//! End-to-end tests for temvoc
//!
//! This crate provides the harness, fixtures and determinism helpers used by
//! the integration tests under `tests/`:
//!
//! - [`harness`]: temp-dir test harness that runs the mosaic command in-process
//! - [`fixtures`]: deterministic test signals and WAV writers
//! - [`determinism`]: repeated-render comparison with BLAKE3 hashes

pub mod determinism;
pub mod fixtures;
pub mod harness;

pub use determinism::{assert_deterministic, compute_hash, verify_determinism, DeterminismResult};
pub use harness::TestHarness;
