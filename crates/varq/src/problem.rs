//! QAOA problem instances.

use tracing::debug;
use varq_sim::{CouplingMatrix, Hamiltonian};

use crate::error::QaoaResult;

/// A fixed QAOA instance: width, depth and the two Hamiltonians.
///
/// Built once at setup and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct QaoaProblem {
    n_qubits: u32,
    depth: usize,
    cost: Hamiltonian,
    mixer: Hamiltonian,
}

impl QaoaProblem {
    /// Ising instance from a coupling matrix: `H₁ = -Σ J[i,j] Z_i Z_j`,
    /// `H₀ = -Σ X_i`.
    pub fn from_coupling(coupling: &CouplingMatrix, depth: usize) -> QaoaResult<Self> {
        let n_qubits = coupling.n_qubits();
        let cost = Hamiltonian::cost(coupling)?;
        let mixer = Hamiltonian::mixing(n_qubits)?;
        debug!(
            n_qubits,
            depth,
            cost_terms = cost.n_terms(),
            "built QAOA problem"
        );
        Ok(Self {
            n_qubits,
            depth,
            cost,
            mixer,
        })
    }

    /// Instance with caller-supplied Hamiltonians. Widths are checked when
    /// circuits are built.
    pub fn new(n_qubits: u32, depth: usize, cost: Hamiltonian, mixer: Hamiltonian) -> Self {
        Self {
            n_qubits,
            depth,
            cost,
            mixer,
        }
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Number of layers p.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of variational parameters (2p).
    pub fn num_parameters(&self) -> usize {
        2 * self.depth
    }

    /// Cost Hamiltonian H₁.
    pub fn cost(&self) -> &Hamiltonian {
        &self.cost
    }

    /// Mixer Hamiltonian H₀.
    pub fn mixer(&self) -> &Hamiltonian {
        &self.mixer
    }
}
