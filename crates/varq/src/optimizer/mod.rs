//! Classical optimizers for the variational loop.
//!
//! Both optimizers are derivative-free: the objective is a black box that
//! may fail, and a failure aborts the search immediately.

mod cobyla;
mod spsa;

pub use cobyla::Cobyla;
pub use spsa::Spsa;

use serde::{Deserialize, Serialize};

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Trust region shrank to its final radius without further progress.
    Converged,
    /// Evaluation budget exhausted before convergence. Not an error.
    MaxEvaluations,
    /// Aborted by a backend failure or cancellation.
    ExternalFailure,
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizerResult {
    /// Best parameters evaluated.
    pub params: Vec<f64>,
    /// Objective value at `params`.
    pub value: f64,
    /// Number of objective evaluations.
    pub evaluations: usize,
    /// Number of accepted steps.
    pub iterations: usize,
    /// Every objective value, in evaluation order.
    pub history: Vec<f64>,
    /// Why the search stopped.
    pub termination: TerminationReason,
}

/// A derivative-free minimizer.
pub trait Optimizer {
    /// Minimize `objective` from `x0`.
    ///
    /// The first objective error is returned unchanged.
    fn minimize<F, E>(&self, objective: F, x0: Vec<f64>) -> Result<OptimizerResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>;
}

/// Runtime choice between the available optimizers.
#[derive(Debug, Clone)]
pub enum OptimizerChoice {
    /// Trust-region linear approximation.
    Cobyla(Cobyla),
    /// Simultaneous perturbation stochastic approximation.
    Spsa(Spsa),
}

impl Optimizer for OptimizerChoice {
    fn minimize<F, E>(&self, objective: F, x0: Vec<f64>) -> Result<OptimizerResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        match self {
            OptimizerChoice::Cobyla(opt) => opt.minimize(objective, x0),
            OptimizerChoice::Spsa(opt) => opt.minimize(objective, x0),
        }
    }
}

/// Objective wrapper that counts evaluations and records their values.
pub(crate) struct Tracked<F> {
    objective: F,
    pub(crate) evaluations: usize,
    pub(crate) history: Vec<f64>,
}

impl<F, E> Tracked<F>
where
    F: FnMut(&[f64]) -> Result<f64, E>,
{
    pub(crate) fn new(objective: F) -> Self {
        Self {
            objective,
            evaluations: 0,
            history: Vec::new(),
        }
    }

    pub(crate) fn call(&mut self, x: &[f64]) -> Result<f64, E> {
        let value = (self.objective)(x)?;
        self.evaluations += 1;
        self.history.push(value);
        Ok(value)
    }
}
