//! Default `validate` behaviour of the `Backend` trait.

use varq_hal::{Backend, BackendOutput, Capabilities, ExecutionMode, HalError, HalResult};
use varq_ir::Circuit;

struct Fixed {
    capabilities: Capabilities,
}

impl Backend for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn is_available(&self) -> bool {
        true
    }

    fn run(&self, circuit: &Circuit, mode: ExecutionMode) -> HalResult<BackendOutput> {
        self.validate(circuit, mode)?;
        Ok(BackendOutput::Counts(Default::default()))
    }
}

fn fixed(num_qubits: u32) -> Fixed {
    Fixed {
        capabilities: Capabilities::simulator(num_qubits),
    }
}

#[test]
fn oversized_circuit_is_rejected() {
    let backend = fixed(2);
    let err = backend
        .run(&Circuit::new("wide", 3), ExecutionMode::Statevector)
        .unwrap_err();
    assert!(matches!(err, HalError::CircuitTooLarge(_)));
}

#[test]
fn zero_shots_is_rejected() {
    let backend = fixed(2);
    let err = backend
        .run(&Circuit::new("c", 2), ExecutionMode::Shots { shots: 0 })
        .unwrap_err();
    assert!(matches!(err, HalError::InvalidShots(_)));
}

#[test]
fn shots_above_limit_are_rejected() {
    let backend = fixed(2);
    let shots = backend.capabilities().max_shots + 1;
    assert!(matches!(
        backend.validate(&Circuit::new("c", 2), ExecutionMode::Shots { shots }),
        Err(HalError::InvalidShots(_))
    ));
}

#[test]
fn statevector_requires_feature() {
    let mut backend = fixed(2);
    backend.capabilities.features.clear();
    assert!(matches!(
        backend.validate(&Circuit::new("c", 2), ExecutionMode::Statevector),
        Err(HalError::Unsupported(_))
    ));
}

#[test]
fn references_are_backends() {
    let backend = fixed(2);
    let by_ref: &Fixed = &backend;
    assert_eq!(Backend::name(&by_ref), "fixed");
    assert!(
        by_ref
            .run(&Circuit::new("c", 1), ExecutionMode::Shots { shots: 8 })
            .is_ok()
    );
}

#[test]
fn execution_mode_serializes_snake_case() {
    let json = serde_json::to_string(&ExecutionMode::Shots { shots: 16 }).unwrap();
    assert_eq!(json, r#"{"shots":{"shots":16}}"#);
}
