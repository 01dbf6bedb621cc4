//! varq Circuit Description
//!
//! This crate holds the circuit representation that flows between the
//! circuit factory, the simulation backend and the expectation evaluator.
//!
//! # Overview
//!
//! A variational circuit is an ordered list of [`Block`]s. Each block is a
//! labelled run of gate [`Instruction`]s: the initial superposition, one
//! cost evolution and one mixer evolution per layer, and optionally the
//! basis rotations a shot-based evaluator appends before sampling.
//!
//! Circuits are cheap to build and carry concrete angles only; a fresh
//! [`Circuit`] is produced for every parameter vector, so nothing here is
//! ever mutated across optimizer iterations.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use varq_ir::{BlockKind, Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("bell_state", 2);
//! circuit.begin_block(BlockKind::Initialization);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.gate_count(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |

pub mod block;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use block::{Block, BlockKind};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::Instruction;
pub use qubit::QubitId;
