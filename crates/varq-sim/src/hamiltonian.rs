//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings over a fixed number of
//! qubits:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z), one per qubit, and c_k ∈ ℝ.
//!
//! Values are immutable once built. Combining operators goes through named
//! operations ([`Hamiltonian::sum`], [`Hamiltonian::tensor_product`]) that
//! return new values.
//!
//! # Example
//!
//! ```rust
//! use varq_sim::hamiltonian::{Axis, Hamiltonian};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let zz = Hamiltonian::two_qubit_zz_operator(2, 0, 1, -1.0).unwrap();
//! let x0 = Hamiltonian::single_qubit_operator(2, 0, Axis::X, 0.5).unwrap();
//! let h = zz.sum(&x0).unwrap();
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.n_qubits(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coupling::CouplingMatrix;
use crate::error::{SimError, SimResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Character used when printing Pauli strings.
    pub fn symbol(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// Axis accepted by [`Hamiltonian::single_qubit_operator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Pauli-X.
    X,
    /// Pauli-Z.
    Z,
}

impl From<Axis> for PauliOp {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => PauliOp::X,
            Axis::Z => PauliOp::Z,
        }
    }
}

/// A tensor product of Pauli operators, one per qubit.
///
/// Position `q` holds the operator acting on qubit `q`, so the length of
/// the string is the number of qubits it is defined over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<PauliOp>,
}

impl PauliString {
    /// The identity string over `n_qubits` qubits.
    pub fn identity(n_qubits: u32) -> Self {
        Self {
            ops: vec![PauliOp::I; n_qubits as usize],
        }
    }

    /// Construct a string over `n_qubits` qubits from sparse (qubit, op)
    /// pairs. Unlisted qubits are identity; a later pair for the same qubit
    /// overwrites an earlier one.
    pub fn from_ops(
        n_qubits: u32,
        ops: impl IntoIterator<Item = (u32, PauliOp)>,
    ) -> SimResult<Self> {
        let mut s = Self::identity(n_qubits);
        for (q, op) in ops {
            if q >= n_qubits {
                return Err(SimError::InvalidIndex {
                    qubit: q,
                    n_qubits,
                    reason: "qubit index must be in [0, n_qubits)",
                });
            }
            s.ops[q as usize] = op;
        }
        Ok(s)
    }

    /// Number of qubits the string is defined over.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True for a string over zero qubits.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operator on qubit `q`, if in range.
    pub fn get(&self, q: u32) -> Option<PauliOp> {
        self.ops.get(q as usize).copied()
    }

    /// The full dense operator list.
    pub fn as_slice(&self) -> &[PauliOp] {
        &self.ops
    }

    /// Non-identity (qubit, op) pairs in ascending qubit order.
    pub fn ops(&self) -> impl Iterator<Item = (u32, PauliOp)> + '_ {
        self.ops
            .iter()
            .enumerate()
            .filter(|(_, op)| **op != PauliOp::I)
            .map(|(q, op)| (q as u32, *op))
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops.iter().filter(|op| **op != PauliOp::I).count()
    }

    /// True if there are no non-identity operators (pure global phase).
    pub fn is_identity(&self) -> bool {
        self.weight() == 0
    }

    /// True if the string is diagonal in the computational basis (I/Z only).
    pub fn is_diagonal(&self) -> bool {
        self.ops
            .iter()
            .all(|op| matches!(op, PauliOp::I | PauliOp::Z))
    }

    /// Bit mask of the qubits carrying a non-identity factor.
    pub fn support_mask(&self) -> usize {
        self.ops().fold(0usize, |mask, (q, _)| mask | (1 << q))
    }

    /// Two Pauli strings commute iff they anticommute on an even number of
    /// positions.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        let anticommuting = self
            .ops
            .iter()
            .zip(&other.ops)
            .filter(|(a, b)| **a != PauliOp::I && **b != PauliOp::I && a != b)
            .count();
        anticommuting % 2 == 0
    }

    /// Tensor product `self ⊗ other`: `self` keeps qubits `0..n₁`, `other`
    /// is shifted onto `n₁..n₁+n₂`.
    pub fn tensor_product(&self, other: &PauliString) -> PauliString {
        let mut ops = self.ops.clone();
        ops.extend_from_slice(&other.ops);
        Self { ops }
    }
}

impl fmt::Display for PauliString {
    /// Printed with qubit 0 as the rightmost character.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in self.ops.iter().rev() {
            write!(f, "{}", op.symbol())?;
        }
        Ok(())
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }
}

/// A sum-of-Pauli-strings Hamiltonian over a fixed number of qubits.
///
/// H = Σ_k  c_k · P_k
///
/// Equality is structural: same width, same terms in the same order.
/// Deserialization goes through [`Hamiltonian::new`], so every term is
/// `n_qubits` wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHamiltonian")]
pub struct Hamiltonian {
    n_qubits: u32,
    terms: Vec<PauliTerm>,
}

#[derive(Deserialize)]
struct RawHamiltonian {
    n_qubits: u32,
    terms: Vec<PauliTerm>,
}

impl TryFrom<RawHamiltonian> for Hamiltonian {
    type Error = SimError;

    fn try_from(raw: RawHamiltonian) -> SimResult<Self> {
        Self::new(raw.n_qubits, raw.terms)
    }
}

impl Hamiltonian {
    /// Create from a list of terms, all of which must be `n_qubits` wide.
    pub fn new(n_qubits: u32, terms: Vec<PauliTerm>) -> SimResult<Self> {
        for term in &terms {
            if term.pauli.len() != n_qubits as usize {
                return Err(SimError::DimensionMismatch {
                    context: "Pauli string length",
                    expected: n_qubits as usize,
                    got: term.pauli.len(),
                });
            }
        }
        Ok(Self { n_qubits, terms })
    }

    /// The zero operator over `n_qubits` qubits.
    pub fn zero(n_qubits: u32) -> Self {
        Self {
            n_qubits,
            terms: vec![],
        }
    }

    /// One-term Hamiltonian `coeff · σ_axis` on `qubit`, identity elsewhere.
    pub fn single_qubit_operator(
        n_qubits: u32,
        qubit: u32,
        axis: Axis,
        coeff: f64,
    ) -> SimResult<Self> {
        let pauli = PauliString::from_ops(n_qubits, [(qubit, axis.into())])?;
        Ok(Self {
            n_qubits,
            terms: vec![PauliTerm::new(coeff, pauli)],
        })
    }

    /// One-term Hamiltonian `coeff · Z_{q1} Z_{q2}`, identity elsewhere.
    ///
    /// `q1 == q2` is rejected: the self-product would collapse to identity.
    pub fn two_qubit_zz_operator(n_qubits: u32, q1: u32, q2: u32, coeff: f64) -> SimResult<Self> {
        if q1 == q2 {
            return Err(SimError::InvalidIndex {
                qubit: q1,
                n_qubits,
                reason: "ZZ coupling requires two distinct qubits",
            });
        }
        let pauli = PauliString::from_ops(n_qubits, [(q1, PauliOp::Z), (q2, PauliOp::Z)])?;
        Ok(Self {
            n_qubits,
            terms: vec![PauliTerm::new(coeff, pauli)],
        })
    }

    /// Term-wise concatenation. No merging is performed.
    pub fn sum(&self, other: &Hamiltonian) -> SimResult<Self> {
        if self.n_qubits != other.n_qubits {
            return Err(SimError::DimensionMismatch {
                context: "Hamiltonian sum",
                expected: self.n_qubits as usize,
                got: other.n_qubits as usize,
            });
        }
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Ok(Self {
            n_qubits: self.n_qubits,
            terms,
        })
    }

    /// Kronecker product of two sums over `n₁ + n₂` qubits.
    ///
    /// `self` acts on the low qubits; each pair of terms contributes one
    /// term with the product of their coefficients.
    pub fn tensor_product(&self, other: &Hamiltonian) -> Self {
        let terms = self
            .terms
            .iter()
            .flat_map(|a| {
                other.terms.iter().map(move |b| {
                    PauliTerm::new(a.coeff * b.coeff, a.pauli.tensor_product(&b.pauli))
                })
            })
            .collect();
        Self {
            n_qubits: self.n_qubits + other.n_qubits,
            terms,
        }
    }

    /// Merge terms with equal Pauli strings and drop zero coefficients.
    ///
    /// First-occurrence order is kept.
    #[must_use]
    pub fn simplified(&self) -> Self {
        let mut merged: Vec<PauliTerm> = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match merged.iter_mut().find(|t| t.pauli == term.pauli) {
                Some(existing) => existing.coeff += term.coeff,
                None => merged.push(term.clone()),
            }
        }
        merged.retain(|t| t.coeff != 0.0);
        Self {
            n_qubits: self.n_qubits,
            terms: merged,
        }
    }

    /// Transverse-field mixer `H₀ = Σ_i (-1)·X_i`.
    pub fn mixing(n_qubits: u32) -> SimResult<Self> {
        (0..n_qubits).try_fold(Self::zero(n_qubits), |acc, q| {
            acc.sum(&Self::single_qubit_operator(n_qubits, q, Axis::X, -1.0)?)
        })
    }

    /// Ising cost `H₁ = Σ_{i≠j} (-J[i,j])·Z_i Z_j` over the non-zero
    /// couplings, in row-major order.
    ///
    /// A non-zero diagonal entry is a self-coupling and fails with
    /// [`SimError::InvalidIndex`].
    pub fn cost(coupling: &CouplingMatrix) -> SimResult<Self> {
        let n = coupling.n_qubits();
        coupling
            .nonzero()
            .try_fold(Self::zero(n), |acc, (i, j, w)| {
                acc.sum(&Self::two_qubit_zz_operator(n, i, j, -w)?)
            })
    }

    /// All terms.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Number of qubits every term acts on.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Σ |c_k|, an upper bound on the spectral norm.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// True if every pair of terms commutes, in which case a single
    /// product-formula slice is exact.
    pub fn is_commuting(&self) -> bool {
        self.terms.iter().enumerate().all(|(i, a)| {
            self.terms[i + 1..]
                .iter()
                .all(|b| a.pauli.commutes_with(&b.pauli))
        })
    }

    /// True if every term is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        self.terms.iter().all(|t| t.pauli.is_diagonal())
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (k, term) in self.terms.iter().enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}·{}", term.coeff, term.pauli)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_little_endian() {
        let s = PauliString::from_ops(3, [(0, PauliOp::X), (2, PauliOp::Z)]).unwrap();
        assert_eq!(s.to_string(), "ZIX");
    }

    #[test]
    fn test_support_mask() {
        let s = PauliString::from_ops(4, [(1, PauliOp::Y), (3, PauliOp::Z)]).unwrap();
        assert_eq!(s.support_mask(), 0b1010);
        assert_eq!(s.weight(), 2);
    }

    #[test]
    fn test_zero_display() {
        assert_eq!(Hamiltonian::zero(2).to_string(), "0");
    }
}
