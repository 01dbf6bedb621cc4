//! `varq`: a QAOA variational optimization harness.
//!
//! Builds depth-p QAOA circuits for an Ising cost Hamiltonian, evaluates
//! ⟨H₁⟩ on a simulation backend, and minimizes it over the 2p angles with
//! a derivative-free classical optimizer:
//!
//! - [`CircuitFactory`] lays out |+⟩^⊗n followed by p alternating cost
//!   and mixer evolution blocks
//! - [`ExpectationEvaluator`] reduces backend output to an expectation,
//!   exactly or from shot samples
//! - [`VariationalOptimizer`] closes the loop with [`Cobyla`] or [`Spsa`]
//! - [`QaoaRunner`] wires all of it from a [`QaoaConfig`]
//!
//! # Quick start
//!
//! ```rust
//! use varq::{
//!     Cobyla, ExpectationEvaluator, ParameterVector, QaoaProblem, VariationalOptimizer,
//! };
//! use varq_adapter_sim::StatevectorBackend;
//! use varq_sim::CouplingMatrix;
//!
//! // Two qubits coupled ferromagnetically, one layer.
//! let coupling = CouplingMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
//! let problem = QaoaProblem::from_coupling(&coupling, 1).unwrap();
//!
//! let evaluator = ExpectationEvaluator::exact(StatevectorBackend::new());
//! let vqa = VariationalOptimizer::new(problem, evaluator, Cobyla::new());
//!
//! let outcome = vqa
//!     .optimize(&ParameterVector::from_angles(&[0.5], &[0.3]), None)
//!     .unwrap();
//! assert!((outcome.value.value + 1.0).abs() < 1e-4);
//! ```

pub mod cancel;
pub mod circuit;
pub mod config;
pub mod error;
pub mod expectation;
pub mod init;
pub mod optimizer;
pub mod params;
pub mod problem;
pub mod runner;
pub mod variational;

pub use cancel::CancellationToken;
pub use circuit::CircuitFactory;
pub use config::{ConfigError, QaoaConfig};
pub use error::{QaoaError, QaoaResult};
pub use expectation::{EvaluationMode, ExpectationEvaluator, ExpectationResult};
pub use init::{InitStrategy, initial_parameters};
pub use optimizer::{
    Cobyla, Optimizer, OptimizerChoice, OptimizerResult, Spsa, TerminationReason,
};
pub use params::ParameterVector;
pub use problem::QaoaProblem;
pub use runner::QaoaRunner;
pub use variational::{OptimizationOutcome, VariationalOptimizer};

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .is_ok()
}
