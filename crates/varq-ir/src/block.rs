//! Labelled instruction blocks.

use serde::{Deserialize, Serialize};

use crate::instruction::Instruction;

/// What a block of instructions implements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Preparation of the initial state.
    Initialization,
    /// Evolution under the cost Hamiltonian for one layer.
    CostEvolution {
        /// Zero-based layer index.
        layer: usize,
        /// Evolution angle γ of this layer.
        angle: f64,
    },
    /// Evolution under the mixing Hamiltonian for one layer.
    MixerEvolution {
        /// Zero-based layer index.
        layer: usize,
        /// Evolution angle β of this layer.
        angle: f64,
    },
    /// Basis rotations applied before a computational-basis measurement.
    MeasurementBasis,
}

impl BlockKind {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Initialization => "init",
            BlockKind::CostEvolution { .. } => "cost",
            BlockKind::MixerEvolution { .. } => "mixer",
            BlockKind::MeasurementBasis => "basis",
        }
    }
}

/// A contiguous run of instructions with a common purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// What this block implements.
    pub kind: BlockKind,
    /// Instructions in application order.
    pub instructions: Vec<Instruction>,
}

impl Block {
    /// Create an empty block.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            instructions: vec![],
        }
    }

    /// Number of instructions in the block.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if the block holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
