//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockKind};
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A quantum circuit made of labelled blocks.
///
/// Gates are always appended to the most recently opened block, so a
/// builder opens a block with [`Circuit::begin_block`] and then emits gates
/// with the fluent helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Circuit width.
    num_qubits: u32,
    /// Blocks in application order.
    blocks: Vec<Block>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            blocks: vec![],
        }
    }

    /// Open a new block; subsequent gates are appended to it.
    pub fn begin_block(&mut self, kind: BlockKind) -> &mut Self {
        self.blocks.push(Block::new(kind));
        self
    }

    /// Append a whole block.
    pub fn push_block(&mut self, block: Block) -> IrResult<&mut Self> {
        for inst in &block.instructions {
            self.check_operands(inst)?;
        }
        self.blocks.push(block);
        Ok(self)
    }

    /// Append an instruction to the open block.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check_operands(&instruction)?;
        let block = self.blocks.last_mut().ok_or(IrError::NoOpenBlock)?;
        block.instructions.push(instruction);
        Ok(self)
    }

    /// Check every instruction for arity, duplicate operands and range.
    ///
    /// The builder methods enforce this on the way in; a deserialized
    /// circuit has to be checked before it is simulated.
    pub fn validate(&self) -> IrResult<()> {
        for block in &self.blocks {
            for inst in &block.instructions {
                self.check_operands(inst)?;
            }
        }
        Ok(())
    }

    fn check_operands(&self, instruction: &Instruction) -> IrResult<()> {
        instruction.validate()?;
        for &q in &instruction.qubits {
            if q.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                    gate_name: Some(instruction.name().to_string()),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit)?)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit)?)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit)?)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit)?)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit)?)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit)?)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit)?)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit)?)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit)?)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        )?)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CZ,
            control,
            target,
        )?)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the blocks in application order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Consume the circuit, returning its blocks.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// All instructions across all blocks, in application order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.blocks.iter().flat_map(|b| b.instructions.iter())
    }

    /// Total number of gates.
    pub fn gate_count(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    /// Circuit depth: the longest chain of instructions sharing a qubit.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits as usize];
        for inst in self.instructions() {
            let level = inst
                .qubits
                .iter()
                .map(|q| levels[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                levels[q.index()] = level;
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_blocks(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_gate_without_block_fails() {
        let mut circuit = Circuit::new("test", 1);
        assert!(matches!(circuit.h(QubitId(0)), Err(IrError::NoOpenBlock)));
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut circuit = Circuit::new("test", 2);
        circuit.begin_block(BlockKind::Initialization);
        let err = circuit.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitOutOfRange {
                qubit: QubitId(2),
                num_qubits: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::new("test", 2);
        circuit
            .begin_block(BlockKind::Initialization)
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        // Parallel H layer, then CX.
        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.gate_count(), 3);
    }

    #[test]
    fn test_blocks_keep_order() {
        let mut circuit = Circuit::new("test", 1);
        circuit.begin_block(BlockKind::Initialization);
        circuit.h(QubitId(0)).unwrap();
        circuit.begin_block(BlockKind::CostEvolution {
            layer: 0,
            angle: 0.3,
        });
        circuit.rz(0.6, QubitId(0)).unwrap();
        circuit.begin_block(BlockKind::MixerEvolution {
            layer: 0,
            angle: 0.2,
        });
        circuit.rx(0.4, QubitId(0)).unwrap();

        let labels: Vec<_> = circuit.blocks().iter().map(|b| b.kind.label()).collect();
        assert_eq!(labels, vec!["init", "cost", "mixer"]);
        let names: Vec<_> = circuit.instructions().map(Instruction::name).collect();
        assert_eq!(names, vec!["h", "rz", "rx"]);
    }

    #[test]
    fn test_push_block_validates_operands() {
        let mut circuit = Circuit::new("test", 1);
        let mut block = Block::new(BlockKind::MeasurementBasis);
        block
            .instructions
            .push(Instruction::single_qubit_gate(StandardGate::H, QubitId(4)).unwrap());
        assert!(circuit.push_block(block).is_err());
        assert_eq!(circuit.num_blocks(), 0);
    }

    #[test]
    fn test_push_block_checks_arity() {
        let mut circuit = Circuit::new("test", 2);
        let block = Block {
            kind: BlockKind::Initialization,
            instructions: vec![Instruction {
                gate: StandardGate::CX,
                qubits: vec![QubitId(0)],
            }],
        };
        let err = circuit.push_block(block).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
        assert_eq!(circuit.num_blocks(), 0);
    }
}
