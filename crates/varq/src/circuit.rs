//! QAOA circuit construction.
//!
//! A depth-p circuit is
//!
//! ```text
//!   init: H on every qubit            → |+⟩^n
//!   for i in 0..p:
//!     cost(γᵢ):  exp(+i · H₁ · γᵢ)
//!     mixer(βᵢ): exp(+i · H₀ · βᵢ)
//! ```
//!
//! Each evolution block is synthesized as `exp(-i H t)` with `t = -angle`.
//! Both Hamiltonians have mutually commuting terms, so the product of
//! per-term rotations is exact. Circuits are rebuilt on every call.

use varq_ir::{Block, BlockKind, Circuit, QubitId};
use varq_sim::{Hamiltonian, TrotterEvolution, TrotterOrder};

use crate::error::{QaoaError, QaoaResult};
use crate::params::ParameterVector;
use crate::problem::QaoaProblem;

/// Stateless builder of QAOA circuits.
///
/// The product-formula settings only matter for Hamiltonians with
/// non-commuting terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitFactory {
    order: TrotterOrder,
    n_steps: usize,
}

impl Default for CircuitFactory {
    fn default() -> Self {
        Self {
            order: TrotterOrder::First,
            n_steps: 1,
        }
    }
}

impl CircuitFactory {
    /// Factory with first-order, single-step synthesis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Product-formula order for non-commuting Hamiltonians.
    #[must_use]
    pub fn with_order(mut self, order: TrotterOrder) -> Self {
        self.order = order;
        self
    }

    /// Trotter slices per evolution block for non-commuting Hamiltonians.
    #[must_use]
    pub fn with_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    /// Uniform superposition: one Hadamard per qubit.
    pub fn initial_state(&self, n_qubits: u32) -> QaoaResult<Circuit> {
        let mut circuit = Circuit::new("qaoa", n_qubits);
        circuit.begin_block(BlockKind::Initialization);
        for q in 0..n_qubits {
            circuit.h(QubitId(q))?;
        }
        Ok(circuit)
    }

    /// Gates for `exp(i · hamiltonian · angle)`, labelled `kind`.
    pub fn evolution_block(
        &self,
        hamiltonian: &Hamiltonian,
        angle: f64,
        kind: BlockKind,
    ) -> QaoaResult<Block> {
        let mut scratch = Circuit::new("evolution", hamiltonian.n_qubits());
        scratch.begin_block(kind);
        TrotterEvolution::new(hamiltonian, -angle, self.n_steps)
            .with_order(self.order)
            .synthesize(&mut scratch)?;
        scratch
            .into_blocks()
            .pop()
            .ok_or(QaoaError::Circuit(varq_ir::IrError::NoOpenBlock))
    }

    /// Initial state followed by p (cost(γᵢ), mixer(βᵢ)) block pairs.
    ///
    /// γ pairs with `cost`, β with `mixer`. Fails with
    /// [`QaoaError::DimensionMismatch`] if the angle lists differ in length
    /// or either Hamiltonian is not `n_qubits` wide.
    pub fn build(
        &self,
        beta: &[f64],
        gamma: &[f64],
        cost: &Hamiltonian,
        mixer: &Hamiltonian,
        n_qubits: u32,
    ) -> QaoaResult<Circuit> {
        if beta.len() != gamma.len() {
            return Err(QaoaError::DimensionMismatch {
                context: "beta length vs gamma length",
                expected: gamma.len(),
                got: beta.len(),
            });
        }
        for (context, h) in [("cost Hamiltonian width", cost), ("mixer Hamiltonian width", mixer)] {
            if h.n_qubits() != n_qubits {
                return Err(QaoaError::DimensionMismatch {
                    context,
                    expected: n_qubits as usize,
                    got: h.n_qubits() as usize,
                });
            }
        }

        let mut circuit = self.initial_state(n_qubits)?;
        for (layer, (&g, &b)) in gamma.iter().zip(beta).enumerate() {
            circuit.push_block(self.evolution_block(
                cost,
                g,
                BlockKind::CostEvolution { layer, angle: g },
            )?)?;
            circuit.push_block(self.evolution_block(
                mixer,
                b,
                BlockKind::MixerEvolution { layer, angle: b },
            )?)?;
        }
        Ok(circuit)
    }

    /// [`CircuitFactory::build`] for a problem and a flat parameter vector,
    /// which must hold exactly 2p angles.
    pub fn build_for(&self, problem: &QaoaProblem, params: &ParameterVector) -> QaoaResult<Circuit> {
        if params.len() != problem.num_parameters() {
            return Err(QaoaError::DimensionMismatch {
                context: "parameter vector length vs 2·depth",
                expected: problem.num_parameters(),
                got: params.len(),
            });
        }
        self.build(
            params.beta(),
            params.gamma(),
            problem.cost(),
            problem.mixer(),
            problem.n_qubits(),
        )
    }
}
