//! Tests for Trotter product-formula synthesis.

use varq_ir::{BlockKind, Circuit, StandardGate};
use varq_sim::SimError;
use varq_sim::hamiltonian::{Axis, Hamiltonian};
use varq_sim::trotter::{TrotterEvolution, TrotterOrder};

fn open(n: u32) -> Circuit {
    let mut c = Circuit::new("trotter", n);
    c.begin_block(BlockKind::Initialization);
    c
}

fn x_plus_z() -> Hamiltonian {
    let x = Hamiltonian::single_qubit_operator(1, 0, Axis::X, 1.0).unwrap();
    let z = Hamiltonian::single_qubit_operator(1, 0, Axis::Z, 0.5).unwrap();
    x.sum(&z).unwrap()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn zero_steps_returns_error() {
    let h = Hamiltonian::mixing(1).unwrap();
    let mut c = open(1);
    assert!(matches!(
        TrotterEvolution::new(&h, 1.0, 0).synthesize(&mut c),
        Err(SimError::InvalidSteps(0))
    ));
}

#[test]
fn width_mismatch_returns_error() {
    let h = Hamiltonian::mixing(3).unwrap();
    let mut c = open(2);
    assert!(matches!(
        TrotterEvolution::new(&h, 1.0, 1).synthesize(&mut c),
        Err(SimError::DimensionMismatch {
            expected: 2,
            got: 3,
            ..
        })
    ));
}

#[test]
fn empty_hamiltonian_emits_nothing() {
    let h = Hamiltonian::zero(2);
    let mut c = open(2);
    TrotterEvolution::new(&h, 1.0, 4).synthesize(&mut c).unwrap();
    assert_eq!(c.gate_count(), 0);
}

#[test]
fn no_open_block_is_an_ir_error() {
    let h = Hamiltonian::mixing(1).unwrap();
    let mut c = Circuit::new("bare", 1);
    assert!(matches!(
        TrotterEvolution::new(&h, 1.0, 1).synthesize(&mut c),
        Err(SimError::Ir(_))
    ));
}

// ---------------------------------------------------------------------------
// Circuit structure
// ---------------------------------------------------------------------------

#[test]
fn commuting_hamiltonian_uses_single_slice() {
    let h = Hamiltonian::mixing(3).unwrap();
    let mut c = open(3);
    TrotterEvolution::new(&h, 0.3, 10)
        .with_order(TrotterOrder::Second)
        .synthesize(&mut c)
        .unwrap();
    // H · Rz · H per qubit
    assert_eq!(c.gate_count(), 9);
    let angles: Vec<f64> = c.instructions().filter_map(|i| i.gate.angle()).collect();
    assert_eq!(angles, vec![-0.6, -0.6, -0.6]);
}

#[test]
fn mixer_angle_for_positive_evolution() {
    // exp(i·Hmix·β) with Hmix = -X is Rx(2β)
    let beta = 0.35;
    let h = Hamiltonian::mixing(1).unwrap();
    let mut c = open(1);
    TrotterEvolution::new(&h, -beta, 1).synthesize(&mut c).unwrap();
    let gates: Vec<StandardGate> = c.instructions().map(|i| i.gate).collect();
    assert_eq!(
        gates,
        vec![StandardGate::H, StandardGate::Rz(2.0 * beta), StandardGate::H]
    );
}

#[test]
fn first_order_repeats_terms_per_step() {
    let h = x_plus_z();
    let mut c = open(1);
    TrotterEvolution::new(&h, 1.0, 4).synthesize(&mut c).unwrap();
    // X term: H Rz H, Z term: Rz -> 4 gates per step
    assert_eq!(c.gate_count(), 16);
}

#[test]
fn second_order_is_symmetric() {
    let h = x_plus_z();
    let mut c = open(1);
    TrotterEvolution::new(&h, 1.0, 1)
        .with_order(TrotterOrder::Second)
        .synthesize(&mut c)
        .unwrap();
    let names: Vec<&str> = c.instructions().map(|i| i.name()).collect();
    let reversed: Vec<&str> = names.iter().rev().copied().collect();
    assert_eq!(names, reversed);
    assert_eq!(c.gate_count(), 8);
}

#[test]
fn second_order_half_step_angles() {
    let h = x_plus_z();
    let mut c = open(1);
    TrotterEvolution::new(&h, 1.0, 2)
        .with_order(TrotterOrder::Second)
        .synthesize(&mut c)
        .unwrap();
    // X coeff 1.0, τ/2 = 0.25 -> Rz(0.5); Z coeff 0.5 -> Rz(0.25)
    let angles: Vec<f64> = c.instructions().filter_map(|i| i.gate.angle()).collect();
    assert_eq!(angles, vec![0.5, 0.25, 0.25, 0.5, 0.5, 0.25, 0.25, 0.5]);
}
