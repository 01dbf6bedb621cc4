//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate applied to concrete qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: StandardGate,
    /// Qubits this instruction operates on, in gate-operand order.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction, checking arity and operand uniqueness.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let instruction = Self {
            gate,
            qubits: qubits.into_iter().collect(),
        };
        instruction.validate()?;
        Ok(instruction)
    }

    /// Check that the operand count matches the gate arity and that no
    /// qubit appears twice.
    pub fn validate(&self) -> IrResult<()> {
        let expected = self.gate.num_qubits();
        if self.qubits.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.gate.name().to_string(),
                expected,
                got: self.qubits.len() as u32,
            });
        }
        for (i, q) in self.qubits.iter().enumerate() {
            if self.qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(self.gate.name().to_string()),
                });
            }
        }
        Ok(())
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> IrResult<Self> {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        Self::gate(gate, [q1, q2])
    }

    /// Get the gate name.
    pub fn name(&self) -> &str {
        self.gate.name()
    }
}
