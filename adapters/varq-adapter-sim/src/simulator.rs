//! Simulator backend implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, instrument};

use varq_hal::{Backend, BackendOutput, Capabilities, ExecutionMode, HalError, HalResult};
use varq_ir::Circuit;

use crate::statevector::Statevector;

/// Default width limit (~16 MB of amplitudes).
const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector backend.
///
/// Exact mode evolves the amplitudes gate by gate and returns them. Shot
/// mode samples the final state from a seedable [`StdRng`], so a fixed seed
/// gives reproducible counts for a fixed sequence of runs.
pub struct StatevectorBackend {
    capabilities: Capabilities,
    rng: Mutex<StdRng>,
    available: AtomicBool,
}

impl StatevectorBackend {
    /// Create a new simulator seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy(), DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), DEFAULT_MAX_QUBITS)
    }

    /// Cap the accepted circuit width.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.capabilities.num_qubits = max_qubits;
        self
    }

    fn from_rng(rng: StdRng, max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            rng: Mutex::new(rng),
            available: AtomicBool::new(true),
        }
    }

    /// Take the backend offline (or bring it back). While offline every
    /// run fails with [`HalError::BackendUnavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Evolve |0…0⟩ through every instruction of `circuit`.
    pub fn simulate(&self, circuit: &Circuit) -> HalResult<Statevector> {
        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst)
                .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;
        }
        Ok(sv)
    }
}

impl Default for StatevectorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for StatevectorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run(&self, circuit: &Circuit, mode: ExecutionMode) -> HalResult<BackendOutput> {
        if !self.is_available() {
            return Err(HalError::BackendUnavailable(format!(
                "{} is offline",
                self.name()
            )));
        }
        self.validate(circuit, mode)?;

        let start = Instant::now();
        debug!(
            num_qubits = circuit.num_qubits(),
            gates = circuit.gate_count(),
            "Starting simulation"
        );
        let sv = self.simulate(circuit)?;

        let output = match mode {
            ExecutionMode::Statevector => BackendOutput::Statevector(sv.into_amplitudes()),
            ExecutionMode::Shots { shots } => {
                let mut rng = self
                    .rng
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                BackendOutput::Counts(sv.sample_counts(shots, &mut *rng))
            }
        };

        debug!(elapsed = ?start.elapsed(), "Simulation completed");
        Ok(output)
    }
}
