//! Pauli-string exponentiation.
//!
//! Emits gates for
//!
//!   exp(-i · coeff · t · P)
//!
//! where P is a tensor product of Pauli operators, using the identity
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CX_ladder · Rz(θ) · CX_ladder†
//!
//! with basis rotations around it for X and Y factors:
//!   X → H · Z · H
//!   Y → Sdg · H · Z · H · S
//!
//! Gate count per term: 2·(k-1) CX + up to 4·k basis gates + 1 Rz,
//! where k is the weight of P.

use varq_ir::{Circuit, QubitId};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{PauliOp, PauliTerm};

/// Append `exp(-i · coeff · t · P)` to the currently open block of
/// `circuit`.
///
/// The term must be exactly as wide as the circuit. An identity string is
/// a global phase and emits nothing.
pub fn append_exp_pauli(circuit: &mut Circuit, term: &PauliTerm, t: f64) -> SimResult<()> {
    if term.pauli.len() != circuit.num_qubits() {
        return Err(SimError::DimensionMismatch {
            context: "Pauli term width vs circuit width",
            expected: circuit.num_qubits(),
            got: term.pauli.len(),
        });
    }

    let ops: Vec<(u32, PauliOp)> = term.pauli.ops().collect();
    let Some(&(last, _)) = ops.last() else {
        return Ok(());
    };
    let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();

    // Rz(θ) = exp(-i θ/2 Z)
    let theta = 2.0 * term.coeff * t;

    basis_change(circuit, &ops, false)?;
    cx_ladder(circuit, &qubits, false)?;
    circuit.rz(theta, QubitId(last))?;
    cx_ladder(circuit, &qubits, true)?;
    basis_change(circuit, &ops, true)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rotate each factor into the Z basis (`undo = false`) or back out of it.
fn basis_change(circuit: &mut Circuit, ops: &[(u32, PauliOp)], undo: bool) -> SimResult<()> {
    for &(q, op) in ops {
        let qid = QubitId(q);
        match (op, undo) {
            (PauliOp::X, _) => {
                circuit.h(qid)?;
            }
            (PauliOp::Y, false) => {
                circuit.sdg(qid)?;
                circuit.h(qid)?;
            }
            (PauliOp::Y, true) => {
                circuit.h(qid)?;
                circuit.s(qid)?;
            }
            (PauliOp::Z | PauliOp::I, _) => {}
        }
    }
    Ok(())
}

/// CX(q[0],q[1]), CX(q[1],q[2]), … collecting the parity on the last qubit.
/// `reverse` walks the ladder backwards, which inverts it.
fn cx_ladder(circuit: &mut Circuit, qubits: &[u32], reverse: bool) -> SimResult<()> {
    let pairs: Vec<&[u32]> = if reverse {
        qubits.windows(2).rev().collect()
    } else {
        qubits.windows(2).collect()
    };
    for pair in pairs {
        circuit.cx(QubitId(pair[0]), QubitId(pair[1]))?;
    }
    Ok(())
}
