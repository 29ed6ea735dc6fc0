//! Determinism checks for rendered sample buffers.
//!
//! A run is deterministic when repeated renders of the same inputs produce
//! bit-identical samples. Comparison is on the `f32` bit patterns, so `-0.0`
//! and `0.0` count as different.

use std::fmt;

/// Outcome of a determinism check.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Number of samples in the reference output.
    pub output_len: usize,
    /// BLAKE3 hash of the reference output.
    pub hash: String,
    /// First difference found, if any.
    pub diff: Option<SampleDiff>,
}

/// First sample that differed between two runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDiff {
    /// Sample index, or the shorter length if the lengths differ.
    pub index: usize,
    /// Value from the reference run.
    pub expected: Option<f32>,
    /// Value from the differing run.
    pub actual: Option<f32>,
    /// Which run (0-indexed) differed.
    pub run_index: usize,
}

impl fmt::Display for SampleDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at sample {}: expected {:?}, got {:?} (run {})",
            self.index, self.expected, self.actual, self.run_index
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output length: {} samples\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_len, self.hash, diff
            );
        }
    }
}

/// Hash samples the same way the CLI reports them.
pub fn compute_hash(samples: &[f32]) -> String {
    temvoc_cli::audio::pcm_hash(samples)
}

/// Renders `runs` times and compares every output to the first.
pub fn verify_determinism<F>(render: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<f32>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = render();
    let hash = compute_hash(&reference);

    for run_index in 1..runs {
        let output = render();
        if let Some(diff) = first_difference(&reference, &output, run_index) {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                output_len: reference.len(),
                hash,
                diff: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_len: reference.len(),
        hash,
        diff: None,
    }
}

/// Asserts that `render` is deterministic over `runs` runs.
pub fn assert_deterministic<F>(render: F, runs: usize)
where
    F: Fn() -> Vec<f32>,
{
    verify_determinism(render, runs).assert_deterministic();
}

fn first_difference(expected: &[f32], actual: &[f32], run_index: usize) -> Option<SampleDiff> {
    let mismatch = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e.to_bits() != a.to_bits());

    match mismatch {
        Some(index) => Some(SampleDiff {
            index,
            expected: Some(expected[index]),
            actual: Some(actual[index]),
            run_index,
        }),
        None if expected.len() != actual.len() => {
            let index = expected.len().min(actual.len());
            Some(SampleDiff {
                index,
                expected: expected.get(index).copied(),
                actual: actual.get(index).copied(),
                run_index,
            })
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identical_runs_pass() {
        let result = verify_determinism(|| vec![0.0, 0.5, -0.5], 3);
        assert!(result.is_deterministic);
        assert_eq!(result.output_len, 3);
        assert_eq!(result.hash.len(), 64);
    }

    #[test]
    fn test_changing_runs_fail() {
        let counter = Cell::new(0u32);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                vec![0.0, counter.get() as f32]
            },
            2,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff.unwrap();
        assert_eq!(diff.index, 1);
        assert_eq!(diff.expected, Some(1.0));
        assert_eq!(diff.actual, Some(2.0));
    }

    #[test]
    fn test_length_change_is_a_difference() {
        let diff = first_difference(&[1.0, 2.0], &[1.0], 1).unwrap();
        assert_eq!(diff.index, 1);
        assert_eq!(diff.expected, Some(2.0));
        assert_eq!(diff.actual, None);
    }

    #[test]
    #[should_panic(expected = "Non-deterministic")]
    fn test_assert_panics_on_difference() {
        let counter = Cell::new(0u32);
        assert_deterministic(
            || {
                counter.set(counter.get() + 1);
                vec![counter.get() as f32]
            },
            2,
        );
    }
}
