//! Gate set used by evolution-block synthesis.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Rotation angles are concrete: circuits are rebuilt for every parameter
/// vector, so there is no symbolic binding step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,

    // Single-qubit rotation gates
    /// Rotation around X axis: exp(-i θ/2 X).
    Rx(f64),
    /// Rotation around Y axis: exp(-i θ/2 Y).
    Ry(f64),
    /// Rotation around Z axis: exp(-i θ/2 Z).
    Rz(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate, operands `[control, target]`.
    CX,
    /// Controlled-Z gate.
    CZ,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_) => 1,

            StandardGate::CX | StandardGate::CZ => 2,
        }
    }

    /// The rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Ry(theta) | StandardGate::Rz(theta) => {
                Some(*theta)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_names() {
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::Rz(0.1).name(), "rz");
        assert_eq!(StandardGate::CX.name(), "cx");
    }

    #[test]
    fn test_gate_arity() {
        assert_eq!(StandardGate::Sdg.num_qubits(), 1);
        assert_eq!(StandardGate::Rx(1.0).num_qubits(), 1);
        assert_eq!(StandardGate::CZ.num_qubits(), 2);
    }

    #[test]
    fn test_gate_angle() {
        assert_eq!(StandardGate::Ry(0.25).angle(), Some(0.25));
        assert_eq!(StandardGate::H.angle(), None);
    }
}
