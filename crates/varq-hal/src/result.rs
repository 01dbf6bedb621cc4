//! Backend output types.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts keyed by bitstring.
///
/// Bitstrings are printed with qubit 0 as the rightmost character, so the
/// string reads as the binary form of the basis-state index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Relative frequency of `bitstring`; 0 for empty counts.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }

    /// The most frequently observed bitstring. Ties resolve to the
    /// lexicographically smallest string.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Pairs sorted by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

/// Output mode requested from a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Return the exact amplitude vector.
    Statevector,
    /// Sample the final state `shots` times in the computational basis.
    Shots {
        /// Number of samples.
        shots: u32,
    },
}

/// What a backend returns for one circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendOutput {
    /// Amplitudes of length 2^n, indexed with qubit 0 as the least
    /// significant bit.
    Statevector(Vec<Complex64>),
    /// Sampled measurement outcomes.
    Counts(Counts),
}

impl BackendOutput {
    /// Amplitudes, if this is a statevector output.
    pub fn as_statevector(&self) -> Option<&[Complex64]> {
        match self {
            BackendOutput::Statevector(amps) => Some(amps),
            BackendOutput::Counts(_) => None,
        }
    }

    /// Counts, if this is a shot output.
    pub fn as_counts(&self) -> Option<&Counts> {
        match self {
            BackendOutput::Counts(counts) => Some(counts),
            BackendOutput::Statevector(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("10", 5);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.total_shots(), 10);
        assert_eq!(counts.len(), 2);
        assert!((counts.probability("10") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_most_frequent_tie_breaks_lexicographically() {
        let mut counts = Counts::new();
        counts.insert("11", 4);
        counts.insert("00", 4);
        counts.insert("01", 1);
        assert_eq!(counts.most_frequent(), Some(("00", 4)));
    }

    #[test]
    fn test_empty_counts() {
        let counts = Counts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.probability("0"), 0.0);
        assert_eq!(counts.most_frequent(), None);
    }
}
