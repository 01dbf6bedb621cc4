//! varq local statevector simulator
//!
//! Exact simulation of [`varq_ir::Circuit`]s for the variational loop. It
//! keeps the full amplitude vector, which limits it to ~20-25 qubits.
//!
//! # Features
//!
//! - **Exact mode**: returns the final amplitudes (no sampling noise)
//! - **Shot mode**: samples the final state, reproducibly under a fixed seed
//! - **Pauli expectations**: [`Statevector::pauli_expectation`] without
//!   building operator matrices
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use varq_adapter_sim::StatevectorBackend;
//! use varq_hal::{Backend, ExecutionMode};
//! use varq_ir::{BlockKind, Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("bell", 2);
//! circuit.begin_block(BlockKind::Initialization);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let backend = StatevectorBackend::with_seed(42);
//! let output = backend.run(&circuit, ExecutionMode::Shots { shots: 1000 }).unwrap();
//! let counts = output.as_counts().unwrap();
//!
//! // Only |00⟩ and |11⟩ are observed
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! ```

mod simulator;
mod statevector;

pub use simulator::StatevectorBackend;
pub use statevector::Statevector;
