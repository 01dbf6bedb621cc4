//! Sampled expectation values.

use varq::{
    CircuitFactory, Cobyla, EvaluationMode, ExpectationEvaluator, ParameterVector, QaoaConfig,
    QaoaProblem, QaoaRunner, VariationalOptimizer,
};
use varq_adapter_sim::StatevectorBackend;
use varq_sim::{Axis, CouplingMatrix, Hamiltonian, PauliString, PauliTerm};

fn problem() -> QaoaProblem {
    let j = CouplingMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
    QaoaProblem::from_coupling(&j, 1).unwrap()
}

#[test]
fn seeded_shots_are_reproducible() {
    let p = problem();
    let circuit = CircuitFactory::new()
        .build_for(&p, &ParameterVector::from_angles(&[0.6], &[0.25]))
        .unwrap();

    let run = |seed| {
        ExpectationEvaluator::with_shots(StatevectorBackend::with_seed(seed), 512)
            .evaluate(&circuit, p.cost())
            .unwrap()
    };
    assert_eq!(run(17), run(17));
}

#[test]
fn shot_estimate_is_close_to_exact() {
    let p = problem();
    let circuit = CircuitFactory::new()
        .build_for(&p, &ParameterVector::from_angles(&[0.6], &[0.25]))
        .unwrap();
    let exact = ExpectationEvaluator::exact(StatevectorBackend::new())
        .evaluate(&circuit, p.cost())
        .unwrap();
    let sampled = ExpectationEvaluator::with_shots(StatevectorBackend::with_seed(3), 20_000)
        .evaluate(&circuit, p.cost())
        .unwrap();

    assert_eq!(sampled.shots, Some(20_000));
    let variance = sampled.variance.unwrap();
    assert!(variance > 0.0);
    // Five standard errors.
    assert!((sampled.value - exact.value).abs() < 5.0 * variance.sqrt() + 1e-9);
    assert!((sampled.value - exact.value).abs() < 0.05);
}

#[test]
fn mixed_bases_and_identity() {
    // 0.5·I + Z0 + X1 on |+⟩|+⟩: ⟨Z0⟩ = 0, ⟨X1⟩ = 1.
    let identity = Hamiltonian::new(2, vec![PauliTerm::new(0.5, PauliString::identity(2))]).unwrap();
    let h = identity
        .sum(&Hamiltonian::single_qubit_operator(2, 0, Axis::Z, 1.0).unwrap())
        .unwrap()
        .sum(&Hamiltonian::single_qubit_operator(2, 1, Axis::X, 1.0).unwrap())
        .unwrap();
    let circuit = CircuitFactory::new().initial_state(2).unwrap();

    let sampled = ExpectationEvaluator::with_shots(StatevectorBackend::with_seed(11), 10_000)
        .evaluate(&circuit, &h)
        .unwrap();
    // X1 is deterministic after the basis change; Z0 is a fair coin.
    assert!((sampled.value - 1.5).abs() < 0.06, "got {}", sampled.value);
    // The caller's circuit is untouched.
    assert_eq!(circuit.num_blocks(), 1);
}

#[test]
fn noisy_optimization_still_descends() {
    let backend = StatevectorBackend::with_seed(5);
    let vqa = VariationalOptimizer::new(
        problem(),
        ExpectationEvaluator::new(&backend, EvaluationMode::Shots { shots: 4096 }),
        Cobyla::new().with_max_evaluations(80),
    );
    let outcome = vqa
        .optimize(&ParameterVector::from_angles(&[0.5], &[0.3]), None)
        .unwrap();
    assert!(outcome.value.value < -0.8, "got {}", outcome.value.value);
    assert!(outcome.value.variance.is_some());
}

#[test]
fn runner_shot_runs_repeat_with_a_seed() {
    let mut config = QaoaConfig::default();
    config.evaluation.mode = varq::config::EvaluationKind::Shots;
    config.evaluation.shots = 256;
    config.evaluation.seed = Some(21);
    config.optimizer.max_evaluations = 40;

    let first = QaoaRunner::from_config(&config).unwrap().run().unwrap();
    let second = QaoaRunner::from_config(&config).unwrap().run().unwrap();
    assert_eq!(first.params, second.params);
    assert_eq!(first.history, second.history);
}
