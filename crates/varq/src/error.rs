//! Error types for the variational harness.

use thiserror::Error;
use varq_hal::HalError;
use varq_ir::IrError;
use varq_sim::SimError;

use crate::config::ConfigError;
use crate::variational::OptimizationOutcome;

/// Errors raised while building, evaluating or optimizing a QAOA instance.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QaoaError {
    /// Hamiltonian construction or evolution synthesis failed.
    #[error(transparent)]
    Hamiltonian(#[from] SimError),

    /// Circuit assembly failed.
    #[error(transparent)]
    Circuit(#[from] IrError),

    /// A length or width disagrees with the configured problem.
    #[error("Dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// What was being compared.
        context: &'static str,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// The simulation backend failed. Fatal for the optimization run.
    #[error("Backend unavailable: {source}")]
    BackendUnavailable {
        /// The backend error.
        source: HalError,
        /// Best result reached before the failure, if any evaluation
        /// succeeded.
        partial: Option<Box<OptimizationOutcome>>,
    },

    /// The backend answered with output that does not fit the request.
    #[error("Unexpected backend output: {0}")]
    InvalidBackendOutput(String),

    /// The run was cancelled through its token.
    #[error("Optimization cancelled")]
    Cancelled {
        /// Best result reached before cancellation, if any.
        partial: Option<Box<OptimizationOutcome>>,
    },

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl QaoaError {
    /// Best-so-far outcome carried by an aborted run.
    pub fn partial(&self) -> Option<&OptimizationOutcome> {
        match self {
            QaoaError::BackendUnavailable { partial, .. } | QaoaError::Cancelled { partial } => {
                partial.as_deref()
            }
            _ => None,
        }
    }

    pub(crate) fn with_partial(self, outcome: Option<OptimizationOutcome>) -> Self {
        let partial = outcome.map(Box::new);
        match self {
            QaoaError::BackendUnavailable { source, .. } => {
                QaoaError::BackendUnavailable { source, partial }
            }
            QaoaError::Cancelled { .. } => QaoaError::Cancelled { partial },
            other => other,
        }
    }
}

impl From<HalError> for QaoaError {
    fn from(source: HalError) -> Self {
        QaoaError::BackendUnavailable {
            source,
            partial: None,
        }
    }
}

/// Result type for QAOA operations.
pub type QaoaResult<T> = Result<T, QaoaError>;
