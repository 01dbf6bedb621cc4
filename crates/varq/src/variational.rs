//! The variational loop.
//!
//! Every objective call rebuilds the circuit from the proposed angles and
//! evaluates ⟨H₁⟩ on it:
//!
//! ```text
//!   params ──→ CircuitFactory::build_for ──→ ExpectationEvaluator::evaluate ──→ value
//!      ↑                                                                         │
//!      └───────────────────────────── Optimizer ─────────────────────────────────┘
//! ```
//!
//! The best point seen so far is kept here rather than trusted to the
//! optimizer, so an aborted run can still report it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
use varq_hal::Backend;

use crate::cancel::CancellationToken;
use crate::circuit::CircuitFactory;
use crate::error::{QaoaError, QaoaResult};
use crate::expectation::{ExpectationEvaluator, ExpectationResult};
use crate::optimizer::{Optimizer, TerminationReason};
use crate::params::ParameterVector;
use crate::problem::QaoaProblem;

/// Final state of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// Best parameters evaluated.
    pub params: ParameterVector,
    /// Expectation of the cost Hamiltonian at `params`.
    pub value: ExpectationResult,
    /// Objective evaluations performed.
    pub evaluations: usize,
    /// Accepted optimizer steps.
    pub iterations: usize,
    /// Objective values in evaluation order.
    pub history: Vec<f64>,
    /// Why the run stopped.
    pub termination: TerminationReason,
}

/// Drives a classical optimizer over the 2p QAOA angles.
#[derive(Debug, Clone)]
pub struct VariationalOptimizer<B, O> {
    problem: QaoaProblem,
    evaluator: ExpectationEvaluator<B>,
    optimizer: O,
    factory: CircuitFactory,
}

impl<B: Backend, O: Optimizer> VariationalOptimizer<B, O> {
    /// Combine a problem, an evaluator and an optimizer.
    pub fn new(problem: QaoaProblem, evaluator: ExpectationEvaluator<B>, optimizer: O) -> Self {
        Self {
            problem,
            evaluator,
            optimizer,
            factory: CircuitFactory::new(),
        }
    }

    /// Use a non-default circuit factory.
    #[must_use]
    pub fn with_factory(mut self, factory: CircuitFactory) -> Self {
        self.factory = factory;
        self
    }

    /// The problem being optimized.
    pub fn problem(&self) -> &QaoaProblem {
        &self.problem
    }

    /// The evaluator.
    pub fn evaluator(&self) -> &ExpectationEvaluator<B> {
        &self.evaluator
    }

    /// ⟨H₁⟩ after the circuit built from `params`.
    pub fn objective(&self, params: &ParameterVector) -> QaoaResult<ExpectationResult> {
        let circuit = self.factory.build_for(&self.problem, params)?;
        self.evaluator.evaluate(&circuit, self.problem.cost())
    }

    /// Minimize ⟨H₁⟩ starting from `initial`.
    ///
    /// A wrong-length `initial` fails before any evaluation. A backend
    /// failure or cancellation aborts the run; the error then carries the
    /// best outcome reached so far, if any evaluation succeeded.
    pub fn optimize(
        &self,
        initial: &ParameterVector,
        cancel: Option<&CancellationToken>,
    ) -> QaoaResult<OptimizationOutcome> {
        if initial.len() != self.problem.num_parameters() {
            return Err(QaoaError::DimensionMismatch {
                context: "initial parameter vector length vs 2·depth",
                expected: self.problem.num_parameters(),
                got: initial.len(),
            });
        }
        info!(
            n_qubits = self.problem.n_qubits(),
            depth = self.problem.depth(),
            "starting QAOA optimization"
        );

        let mut best: Option<(ParameterVector, ExpectationResult)> = None;
        let mut history: Vec<f64> = Vec::new();

        let result = self.optimizer.minimize(
            |x: &[f64]| -> QaoaResult<f64> {
                if cancel.is_some_and(CancellationToken::is_cancelled) {
                    return Err(QaoaError::Cancelled { partial: None });
                }
                let params = ParameterVector::new(x.to_vec());
                let result = self.objective(&params)?;
                history.push(result.value);
                trace!(evaluation = history.len(), value = result.value, ?x, "evaluated");

                if best.as_ref().is_none_or(|(_, b)| result.value < b.value) {
                    debug!(
                        evaluation = history.len(),
                        value = result.value,
                        "new best"
                    );
                    best = Some((params, result));
                }
                Ok(result.value)
            },
            initial.as_slice().to_vec(),
        );

        match result {
            Ok(res) => {
                let (params, value) = match best {
                    Some(found) => found,
                    None => (ParameterVector::new(res.params), ExpectationResult::exact(res.value)),
                };
                let outcome = OptimizationOutcome {
                    params,
                    value,
                    evaluations: res.evaluations,
                    iterations: res.iterations,
                    history,
                    termination: res.termination,
                };
                info!(
                    value = outcome.value.value,
                    evaluations = outcome.evaluations,
                    termination = ?outcome.termination,
                    "QAOA optimization finished"
                );
                Ok(outcome)
            }
            Err(err) => {
                let partial = best.map(|(params, value)| OptimizationOutcome {
                    params,
                    value,
                    evaluations: history.len(),
                    iterations: 0,
                    history,
                    termination: TerminationReason::ExternalFailure,
                });
                info!(error = %err, has_partial = partial.is_some(), "QAOA optimization aborted");
                Err(err.with_partial(partial))
            }
        }
    }
}
