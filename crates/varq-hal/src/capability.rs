//! Backend capability introspection.

use serde::{Deserialize, Serialize};

/// What a backend can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Largest circuit width accepted.
    pub num_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or hardware (`false`).
    pub is_simulator: bool,
    /// Capability flags, e.g. `"statevector"`, `"shots"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "statevector".into(),
            num_qubits,
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["statevector".into(), "shots".into()],
        }
    }

    /// True if `feature` is listed.
    pub fn supports(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}
