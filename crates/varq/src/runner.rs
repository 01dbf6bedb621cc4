//! End-to-end QAOA runs driven by a [`QaoaConfig`].

use tracing::{info, instrument};
use varq_adapter_sim::{Statevector, StatevectorBackend};
use varq_sim::CouplingMatrix;

use crate::cancel::CancellationToken;
use crate::circuit::CircuitFactory;
use crate::config::QaoaConfig;
use crate::error::QaoaResult;
use crate::expectation::ExpectationEvaluator;
use crate::init::initial_parameters;
use crate::optimizer::OptimizerChoice;
use crate::params::ParameterVector;
use crate::problem::QaoaProblem;
use crate::variational::{OptimizationOutcome, VariationalOptimizer};

/// Owns a problem, a local simulator and an optimizer built from
/// configuration.
///
/// # Example
///
/// ```
/// use varq::{QaoaConfig, QaoaRunner};
///
/// let runner = QaoaRunner::from_config(&QaoaConfig::default()).unwrap();
/// let outcome = runner.run().unwrap();
/// assert!(outcome.value.value < -0.99);
/// ```
pub struct QaoaRunner {
    config: QaoaConfig,
    problem: QaoaProblem,
    backend: StatevectorBackend,
    factory: CircuitFactory,
    optimizer: OptimizerChoice,
    cancel: CancellationToken,
}

impl QaoaRunner {
    /// Validate `config` and build everything a run needs.
    pub fn from_config(config: &QaoaConfig) -> QaoaResult<Self> {
        config.validate()?;
        let coupling = CouplingMatrix::from_rows(config.problem.coupling.clone())?;
        let problem = QaoaProblem::from_coupling(&coupling, config.problem.depth)?;
        let backend = match config.evaluation.seed {
            Some(seed) => StatevectorBackend::with_seed(seed),
            None => StatevectorBackend::new(),
        };

        Ok(Self {
            config: config.clone(),
            problem,
            backend,
            factory: config.circuit_factory(),
            optimizer: config.build_optimizer(),
            cancel: CancellationToken::new(),
        })
    }

    /// The problem instance.
    pub fn problem(&self) -> &QaoaProblem {
        &self.problem
    }

    /// The simulator backend.
    pub fn backend(&self) -> &StatevectorBackend {
        &self.backend
    }

    /// Token that cancels any run in progress.
    ///
    /// Cancellation is sticky: once cancelled, every later `run*` call on
    /// this runner fails with [`crate::QaoaError::Cancelled`] until
    /// [`QaoaRunner::reset_cancellation`] is called.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Clear a previous cancellation so the runner can be used again.
    /// Tokens already handed out stay connected to the runner.
    pub fn reset_cancellation(&self) {
        self.cancel.reset();
    }

    fn variational(&self) -> VariationalOptimizer<&StatevectorBackend, OptimizerChoice> {
        let evaluator = ExpectationEvaluator::new(&self.backend, self.config.evaluation_mode());
        VariationalOptimizer::new(self.problem.clone(), evaluator, self.optimizer.clone())
            .with_factory(self.factory)
    }

    /// One optimization from the configured initial parameters.
    pub fn run(&self) -> QaoaResult<OptimizationOutcome> {
        self.run_from(&self.initial_parameters(self.config.init.seed))
    }

    /// One optimization from `initial`.
    pub fn run_from(&self, initial: &ParameterVector) -> QaoaResult<OptimizationOutcome> {
        self.variational().optimize(initial, Some(&self.cancel))
    }

    /// `restarts` optimizations from seeds `seed, seed + 1, …`; returns the
    /// lowest-valued outcome. Zero restarts behaves like one. The first
    /// failure aborts the remaining restarts.
    #[instrument(skip(self))]
    pub fn run_with_restarts(&self, restarts: usize) -> QaoaResult<OptimizationOutcome> {
        let base = self.config.init.seed;
        let mut best = self.run_from(&self.initial_parameters(base))?;
        for k in 1..restarts {
            let seed = base.wrapping_add(k as u64);
            let outcome = self.run_from(&self.initial_parameters(seed))?;
            info!(restart = k, seed, value = outcome.value.value, "restart finished");
            if outcome.value.value < best.value.value {
                best = outcome;
            }
        }
        Ok(best)
    }

    /// Final amplitudes of the circuit built from `params`.
    pub fn final_state(&self, params: &ParameterVector) -> QaoaResult<Statevector> {
        let circuit = self.factory.build_for(&self.problem, params)?;
        ExpectationEvaluator::exact(&self.backend).statevector(&circuit)
    }

    fn initial_parameters(&self, seed: u64) -> ParameterVector {
        initial_parameters(self.problem.depth(), self.config.init.strategy, seed)
    }
}
