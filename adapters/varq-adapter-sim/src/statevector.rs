//! Statevector simulation engine.
//!
//! Amplitudes are indexed with qubit 0 as the least significant bit.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use varq_hal::Counts;
use varq_ir::{Instruction, IrError, IrResult, StandardGate};
use varq_sim::{PauliOp, PauliString};

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap amplitudes returned by a backend. `None` unless the length is
    /// a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Option<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return None;
        }
        Some(Self {
            amplitudes,
            num_qubits: len.trailing_zeros() as usize,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Borrow the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Take the amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// |amplitude|² for every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Apply an instruction to the statevector.
    ///
    /// Fails without touching the amplitudes if the operands do not fit
    /// the gate or the register.
    pub fn apply(&mut self, instruction: &Instruction) -> IrResult<()> {
        instruction.validate()?;
        if let Some(&q) = instruction.qubits.iter().find(|q| q.index() >= self.num_qubits) {
            return Err(IrError::QubitOutOfRange {
                qubit: q,
                num_qubits: self.num_qubits as u32,
                gate_name: Some(instruction.name().to_string()),
            });
        }
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        match instruction.gate {
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::Rx(theta) => self.apply_rx(qubits[0], theta),
            StandardGate::Ry(theta) => self.apply_ry(qubits[0], theta),
            StandardGate::Rz(theta) => self.apply_rz(qubits[0], theta),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
        }
        Ok(())
    }

    /// ⟨ψ|P|ψ⟩ for a Pauli string of the same width, or `None` on a width
    /// mismatch.
    ///
    /// P|i⟩ = i^{#Y} · (-1)^{|i ∧ (Y|Z)|} · |i ⊕ (X|Y)⟩, so the sum runs
    /// over basis states without building P.
    pub fn pauli_expectation(&self, pauli: &PauliString) -> Option<f64> {
        if pauli.len() != self.num_qubits {
            return None;
        }
        let mut flip = 0usize;
        let mut sign = 0usize;
        let mut n_y = 0u32;
        for (q, op) in pauli.ops() {
            let bit = 1usize << q;
            match op {
                PauliOp::X => flip |= bit,
                PauliOp::Y => {
                    flip |= bit;
                    sign |= bit;
                    n_y += 1;
                }
                PauliOp::Z => sign |= bit,
                PauliOp::I => {}
            }
        }
        let global = Complex64::i().powu(n_y);

        let mut acc = Complex64::new(0.0, 0.0);
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let parity = if (i & sign).count_ones() % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            acc += self.amplitudes[i ^ flip].conj() * amp * parity;
        }
        Some((global * acc).re)
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        self.apply_phase(qubit, PI);
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Sample one computational-basis outcome.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }
        // Rounding can leave the total slightly below 1.
        self.amplitudes.len() - 1
    }

    /// Draw `shots` samples into a histogram.
    pub fn sample_counts<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> Counts {
        let cumulative: Vec<f64> = self
            .amplitudes
            .iter()
            .scan(0.0, |acc, amp| {
                *acc += amp.norm_sqr();
                Some(*acc)
            })
            .collect();
        let last = cumulative.len() - 1;

        let mut counts = Counts::new();
        for _ in 0..shots {
            let r: f64 = rng.r#gen();
            let outcome = cumulative.partition_point(|&c| c <= r).min(last);
            counts.insert(self.outcome_to_bitstring(outcome), 1);
        }
        counts
    }

    /// Convert measurement outcome to bitstring, qubit 0 rightmost.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
    }
}
