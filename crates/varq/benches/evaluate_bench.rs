//! Benchmarks for the exact evaluation path
//!
//! Run with: cargo bench -p varq

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use varq::{CircuitFactory, ExpectationEvaluator, ParameterVector, QaoaProblem};
use varq_adapter_sim::StatevectorBackend;
use varq_sim::CouplingMatrix;

/// Ring of `n` qubits with unit couplings.
fn ring(n: u32, depth: usize) -> QaoaProblem {
    let edges = (0..n).map(|i| (i, (i + 1) % n));
    let j = CouplingMatrix::from_edges(n, edges, 1.0).unwrap();
    QaoaProblem::from_coupling(&j, depth).unwrap()
}

fn params(depth: usize) -> ParameterVector {
    let gamma: Vec<f64> = (0..depth).map(|i| 0.2 + 0.1 * i as f64).collect();
    let beta: Vec<f64> = (0..depth).map(|i| 0.4 - 0.05 * i as f64).collect();
    ParameterVector::from_angles(&gamma, &beta)
}

/// Benchmark circuit construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_build");
    let factory = CircuitFactory::new();

    for depth in &[1usize, 2, 4] {
        let problem = ring(8, *depth);
        let x = params(*depth);
        group.bench_with_input(BenchmarkId::new("ring8", depth), depth, |b, _| {
            b.iter(|| factory.build_for(black_box(&problem), black_box(&x)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark one objective evaluation: build plus exact expectation
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_evaluate");
    let factory = CircuitFactory::new();
    let evaluator = ExpectationEvaluator::exact(StatevectorBackend::new());

    for n in &[4u32, 8, 12, 16] {
        let problem = ring(*n, 2);
        let x = params(2);
        group.bench_with_input(BenchmarkId::new("ring_p2", n), n, |b, _| {
            b.iter(|| {
                let circuit = factory.build_for(&problem, black_box(&x)).unwrap();
                evaluator.evaluate(&circuit, problem.cost()).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_evaluate);
criterion_main!(benches);
