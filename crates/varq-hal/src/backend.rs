//! Backend trait.
//!
//! A backend turns a [`Circuit`] into either its exact final amplitudes or
//! a histogram of sampled outcomes:
//!
//! ```text
//!   capabilities() ──→ is_available() ──→ run(circuit, mode)
//!    (sync, &ref)         (sync)             (sync)
//! ```
//!
//! ## Method table
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `name()` | yes | `&str` |
//! | `capabilities()` | yes | `&Capabilities` |
//! | `is_available()` | yes | `bool` |
//! | `run()` | yes | `HalResult<BackendOutput>` |
//! | `validate()` | provided | `HalResult<()>` |

use varq_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::{BackendOutput, ExecutionMode};

/// Trait for simulation backends.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; implementations cache
///   it at construction.
/// - `run()` in [`ExecutionMode::Statevector`] is deterministic for an
///   identical circuit.
/// - `run()` in [`ExecutionMode::Shots`] draws from a seedable source, so a
///   fixed seed reproduces the same counts.
/// - An unreachable backend returns [`HalError::BackendUnavailable`].
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Whether the backend currently accepts circuits.
    fn is_available(&self) -> bool;

    /// Execute `circuit` and return the output requested by `mode`.
    fn run(&self, circuit: &Circuit, mode: ExecutionMode) -> HalResult<BackendOutput>;

    /// Check that `circuit` is well formed, then check it and `mode`
    /// against [`Backend::capabilities`].
    fn validate(&self, circuit: &Circuit, mode: ExecutionMode) -> HalResult<()> {
        circuit
            .validate()
            .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;
        let caps = self.capabilities();
        if circuit.num_qubits() > caps.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but {} only supports {}",
                circuit.num_qubits(),
                self.name(),
                caps.num_qubits
            )));
        }
        match mode {
            ExecutionMode::Statevector if !caps.supports("statevector") => Err(
                HalError::Unsupported(format!("{} cannot return amplitudes", self.name())),
            ),
            ExecutionMode::Shots { shots: 0 } => {
                Err(HalError::InvalidShots("shots must be positive".into()))
            }
            ExecutionMode::Shots { shots } if shots > caps.max_shots => {
                Err(HalError::InvalidShots(format!(
                    "{shots} exceeds the limit of {}",
                    caps.max_shots
                )))
            }
            _ => Ok(()),
        }
    }
}

impl<B: Backend + ?Sized> Backend for &B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn capabilities(&self) -> &Capabilities {
        (**self).capabilities()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn run(&self, circuit: &Circuit, mode: ExecutionMode) -> HalResult<BackendOutput> {
        (**self).run(circuit, mode)
    }
}
