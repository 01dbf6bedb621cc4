//! Aborted runs: backend outages and cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use varq::{
    CancellationToken, Cobyla, ExpectationEvaluator, ParameterVector, QaoaConfig, QaoaError,
    QaoaProblem, QaoaRunner, TerminationReason, VariationalOptimizer,
};
use varq_adapter_sim::StatevectorBackend;
use varq_hal::{Backend, BackendOutput, Capabilities, ExecutionMode, HalError, HalResult};
use varq_ir::Circuit;
use varq_sim::CouplingMatrix;

/// Runs normally `healthy_runs` times, then takes the simulator offline.
/// Optionally cancels a token instead of failing.
struct Degrading {
    inner: StatevectorBackend,
    runs: AtomicUsize,
    healthy_runs: usize,
    cancel: Option<CancellationToken>,
}

impl Degrading {
    fn failing_after(healthy_runs: usize) -> Self {
        Self {
            inner: StatevectorBackend::new(),
            runs: AtomicUsize::new(0),
            healthy_runs,
            cancel: None,
        }
    }

    fn cancelling_after(healthy_runs: usize, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..Self::failing_after(healthy_runs)
        }
    }

    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Backend for Degrading {
    fn name(&self) -> &str {
        "degrading"
    }

    fn capabilities(&self) -> &Capabilities {
        self.inner.capabilities()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn run(&self, circuit: &Circuit, mode: ExecutionMode) -> HalResult<BackendOutput> {
        let n = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        if n >= self.healthy_runs {
            match &self.cancel {
                Some(token) => token.cancel(),
                None => self.inner.set_available(false),
            }
        }
        self.inner.run(circuit, mode)
    }
}

fn problem() -> QaoaProblem {
    let j = CouplingMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
    QaoaProblem::from_coupling(&j, 1).unwrap()
}

fn start() -> ParameterVector {
    ParameterVector::from_angles(&[0.5], &[0.3])
}

#[test]
fn outage_mid_run_returns_best_so_far() {
    let backend = Degrading::failing_after(5);
    let vqa = VariationalOptimizer::new(problem(), ExpectationEvaluator::exact(&backend), Cobyla::new());

    let err = vqa.optimize(&start(), None).unwrap_err();
    assert!(matches!(
        err,
        QaoaError::BackendUnavailable {
            source: HalError::BackendUnavailable(_),
            ..
        }
    ));

    let partial = err.partial().expect("four evaluations succeeded");
    assert_eq!(partial.termination, TerminationReason::ExternalFailure);
    assert_eq!(partial.evaluations, 4);
    assert_eq!(partial.history.len(), 4);
    let min = partial.history.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(partial.value.value, min);
    // The failing call is the last one; nothing is retried.
    assert_eq!(backend.runs(), 5);
}

#[test]
fn outage_before_any_evaluation_has_no_partial() {
    let backend = StatevectorBackend::new();
    backend.set_available(false);
    let vqa = VariationalOptimizer::new(problem(), ExpectationEvaluator::exact(&backend), Cobyla::new());

    let err = vqa.optimize(&start(), None).unwrap_err();
    assert!(matches!(err, QaoaError::BackendUnavailable { .. }));
    assert!(err.partial().is_none());
}

#[test]
fn cancellation_stops_before_next_evaluation() {
    let token = CancellationToken::new();
    let backend = Degrading::cancelling_after(3, token.clone());
    let vqa = VariationalOptimizer::new(problem(), ExpectationEvaluator::exact(&backend), Cobyla::new());

    let err = vqa.optimize(&start(), Some(&token)).unwrap_err();
    assert!(matches!(err, QaoaError::Cancelled { .. }));
    let partial = err.partial().expect("three evaluations succeeded");
    assert_eq!(partial.evaluations, 3);
    assert_eq!(partial.termination, TerminationReason::ExternalFailure);
    assert_eq!(backend.runs(), 3);
}

#[test]
fn cancelled_runner_does_not_evaluate() {
    let runner = QaoaRunner::from_config(&QaoaConfig::default()).unwrap();
    runner.cancellation_token().cancel();
    let err = runner.run().unwrap_err();
    assert!(matches!(err, QaoaError::Cancelled { partial: None }));
}

#[test]
fn cancellation_sticks_until_reset() {
    let runner = QaoaRunner::from_config(&QaoaConfig::default()).unwrap();
    let token = runner.cancellation_token();
    token.cancel();
    assert!(matches!(runner.run(), Err(QaoaError::Cancelled { .. })));
    assert!(matches!(
        runner.run_with_restarts(2),
        Err(QaoaError::Cancelled { .. })
    ));

    runner.reset_cancellation();
    assert!(!token.is_cancelled());
    let outcome = runner.run().unwrap();
    assert!(outcome.value.value < -0.99);
}

#[test]
fn oversized_circuit_is_a_backend_failure() {
    let j = CouplingMatrix::from_edges(4, [(0, 1), (2, 3)], 1.0).unwrap();
    let problem = QaoaProblem::from_coupling(&j, 1).unwrap();
    let backend = StatevectorBackend::new().with_max_qubits(3);
    let vqa = VariationalOptimizer::new(problem, ExpectationEvaluator::exact(backend), Cobyla::new());

    let err = vqa.optimize(&start(), None).unwrap_err();
    assert!(matches!(
        err,
        QaoaError::BackendUnavailable {
            source: HalError::CircuitTooLarge(_),
            partial: None,
        }
    ));
}
