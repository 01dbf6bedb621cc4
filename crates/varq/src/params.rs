//! QAOA parameter vectors.

use serde::{Deserialize, Serialize};

/// The 2p angles of a depth-p QAOA circuit, stored as `[γ₀…γₚ₋₁, β₀…βₚ₋₁]`.
///
/// γ drives the cost evolution and β the mixer evolution of each layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterVector(Vec<f64>);

impl ParameterVector {
    /// Wrap a flat `[γ…, β…]` vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Concatenate separate angle lists. Lengths are not checked here; a
    /// mismatch is rejected when a circuit is built.
    pub fn from_angles(gamma: &[f64], beta: &[f64]) -> Self {
        Self(gamma.iter().chain(beta).copied().collect())
    }

    /// The empty vector of a depth-0 instance.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of layers implied by the length (`len / 2`).
    pub fn depth(&self) -> usize {
        self.0.len() / 2
    }

    /// Cost angles γ: the first half.
    pub fn gamma(&self) -> &[f64] {
        &self.0[..self.depth()]
    }

    /// Mixer angles β: the second half.
    pub fn beta(&self) -> &[f64] {
        &self.0[self.depth()..]
    }

    /// Total number of angles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for depth 0.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flat view.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Take the flat vector.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for ParameterVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl AsRef<[f64]> for ParameterVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_order() {
        let params = ParameterVector::from_angles(&[0.1, 0.2], &[0.3, 0.4]);
        assert_eq!(params.as_slice(), &[0.1, 0.2, 0.3, 0.4]);
        assert_eq!(params.gamma(), &[0.1, 0.2]);
        assert_eq!(params.beta(), &[0.3, 0.4]);
        assert_eq!(params.depth(), 2);
    }

    #[test]
    fn test_empty() {
        let params = ParameterVector::empty();
        assert!(params.gamma().is_empty());
        assert!(params.beta().is_empty());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let params = ParameterVector::new(vec![0.5, 0.25]);
        assert_eq!(serde_json::to_string(&params).unwrap(), "[0.5,0.25]");
    }
}
