//! Trotter-Suzuki product-formula synthesis.
//!
//! Approximates `exp(-i H t)` by splitting the evolution into `n_steps`
//! slices, each evolved exactly under each term in sequence.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/n)]^n
//!
//! Error: O(t² / n).
//!
//! # Second-order Trotter (Suzuki-Trotter)
//!
//!   exp(-i H t) ≈ [S₂(t/n)]^n
//!   S₂(τ) = [∏_k exp(-i c_k P_k τ/2)] · [∏_k exp(-i c_{n-k} P_{n-k} τ/2)]
//!
//! Error: O(t³ / n²).
//!
//! When every pair of terms commutes the product of single-term
//! exponentials is exact, and one slice of the full time is emitted
//! regardless of `n_steps` or order. Both QAOA Hamiltonians fall into this
//! case.

use serde::{Deserialize, Serialize};
use tracing::debug;
use varq_ir::Circuit;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::synthesis::append_exp_pauli;

/// Product-formula order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrotterOrder {
    /// Lie-Trotter.
    #[default]
    First,
    /// Symmetric Suzuki-Trotter.
    Second,
}

/// Trotter product-formula time-evolution synthesiser.
#[derive(Debug, Clone)]
pub struct TrotterEvolution<'a> {
    hamiltonian: &'a Hamiltonian,
    /// Total evolution time t.
    t: f64,
    /// Number of Trotter steps (repetitions).
    n_steps: usize,
    order: TrotterOrder,
}

impl<'a> TrotterEvolution<'a> {
    /// Construct a first-order synthesiser for `exp(-i H t)`.
    ///
    /// # Arguments
    /// * `hamiltonian`: the Hamiltonian H = Σ c_k P_k
    /// * `t`: total evolution time
    /// * `n_steps`: number of Trotter slices (higher → more accurate)
    pub fn new(hamiltonian: &'a Hamiltonian, t: f64, n_steps: usize) -> Self {
        Self {
            hamiltonian,
            t,
            n_steps,
            order: TrotterOrder::First,
        }
    }

    /// Select the product-formula order.
    #[must_use]
    pub fn with_order(mut self, order: TrotterOrder) -> Self {
        self.order = order;
        self
    }

    /// Append the evolution to the currently open block of `circuit`.
    ///
    /// The circuit must be exactly as wide as the Hamiltonian. The zero
    /// Hamiltonian evolves as the identity and emits nothing.
    pub fn synthesize(&self, circuit: &mut Circuit) -> SimResult<()> {
        if self.n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        let width = self.hamiltonian.n_qubits() as usize;
        if circuit.num_qubits() != width {
            return Err(SimError::DimensionMismatch {
                context: "Hamiltonian width vs circuit width",
                expected: circuit.num_qubits(),
                got: width,
            });
        }

        let terms = self.hamiltonian.terms();
        if self.hamiltonian.is_commuting() {
            debug!(
                n_terms = terms.len(),
                t = self.t,
                "commuting Hamiltonian, emitting single exact slice"
            );
            for term in terms {
                append_exp_pauli(circuit, term, self.t)?;
            }
            return Ok(());
        }

        debug!(
            n_terms = terms.len(),
            n_steps = self.n_steps,
            order = ?self.order,
            t = self.t,
            "synthesising Trotter circuit"
        );
        match self.order {
            TrotterOrder::First => {
                let step_t = self.t / self.n_steps as f64;
                for _ in 0..self.n_steps {
                    for term in terms {
                        append_exp_pauli(circuit, term, step_t)?;
                    }
                }
            }
            TrotterOrder::Second => {
                let half_t = self.t / (2.0 * self.n_steps as f64);
                for _ in 0..self.n_steps {
                    for term in terms {
                        append_exp_pauli(circuit, term, half_t)?;
                    }
                    for term in terms.iter().rev() {
                        append_exp_pauli(circuit, term, half_t)?;
                    }
                }
            }
        }
        Ok(())
    }
}
