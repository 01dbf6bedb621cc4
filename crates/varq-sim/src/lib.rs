//! `varq-sim`: Pauli-sum Hamiltonians and their time-evolution circuits.
//!
//! Builds the two Hamiltonians of a QAOA instance and converts
//! `exp(-i H t)` into gate blocks of a `varq_ir::Circuit`:
//!
//! - [`Hamiltonian::mixing`]: `H₀ = -Σ_i X_i`
//! - [`Hamiltonian::cost`]: `H₁ = -Σ_{i≠j} J[i,j] Z_i Z_j` from a [`CouplingMatrix`]
//! - [`TrotterEvolution`]: first- or second-order product formulas, exact
//!   for Hamiltonians whose terms mutually commute
//!
//! # Quick start
//!
//! ```rust
//! use varq_ir::{BlockKind, Circuit};
//! use varq_sim::{CouplingMatrix, Hamiltonian, TrotterEvolution};
//!
//! let j = CouplingMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
//! let cost = Hamiltonian::cost(&j).unwrap();
//! assert_eq!(cost.n_terms(), 1);
//!
//! let mut circuit = Circuit::new("cost", 2);
//! circuit.begin_block(BlockKind::CostEvolution { layer: 0, angle: 0.4 });
//! TrotterEvolution::new(&cost, -0.4, 1).synthesize(&mut circuit).unwrap();
//! assert_eq!(circuit.gate_count(), 3); // CX · Rz · CX
//! ```

pub mod coupling;
pub mod error;
pub mod hamiltonian;
pub mod synthesis;
pub mod trotter;

pub use coupling::CouplingMatrix;
pub use error::{SimError, SimResult};
pub use hamiltonian::{Axis, Hamiltonian, PauliOp, PauliString, PauliTerm};
pub use trotter::{TrotterEvolution, TrotterOrder};
