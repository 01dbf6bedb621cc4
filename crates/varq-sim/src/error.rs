//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while building Hamiltonians or synthesising evolutions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A qubit index is out of range or used in a degenerate way.
    #[error("Invalid qubit index {qubit} for {n_qubits} qubits: {reason}")]
    InvalidIndex {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits the operator acts on.
        n_qubits: u32,
        /// What made the index invalid.
        reason: &'static str,
    },

    /// Two objects that must share a size do not.
    #[error("Dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Where the mismatch was detected.
        context: &'static str,
        /// The required size.
        expected: usize,
        /// The size that was supplied.
        got: usize,
    },

    /// n_steps must be ≥ 1.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] varq_ir::IrError),
}

/// Result type for Hamiltonian and synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
