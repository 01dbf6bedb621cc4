//! Configuration for a QAOA run.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML, or JSON for a `.json` extension)
//! 2. Environment variables (with VARQ_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;
use varq_sim::TrotterOrder;

use crate::circuit::CircuitFactory;
use crate::expectation::EvaluationMode;
use crate::init::InitStrategy;
use crate::optimizer::{Cobyla, OptimizerChoice, Spsa};

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaoaConfig {
    /// Problem instance
    #[serde(default)]
    pub problem: ProblemConfig,

    /// Initial parameters
    #[serde(default)]
    pub init: InitConfig,

    /// Classical optimizer
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Expectation evaluation
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Evolution-block synthesis
    #[serde(default)]
    pub circuit: CircuitConfig,
}

/// Problem instance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemConfig {
    /// Number of qubits n
    #[serde(default = "default_n_qubits")]
    pub n_qubits: u32,

    /// Number of QAOA layers p
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// n×n coupling matrix, row-major. Only off-diagonal entries may be
    /// non-zero.
    #[serde(default = "default_coupling")]
    pub coupling: Vec<Vec<f64>>,
}

/// Initial parameter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitConfig {
    /// Initialization strategy
    #[serde(default)]
    pub strategy: InitStrategy,

    /// Seed for random strategies
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Which classical optimizer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerMethod {
    /// Trust-region linear approximation
    #[default]
    Cobyla,
    /// Simultaneous perturbation stochastic approximation
    Spsa,
}

/// Classical optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Optimizer: "cobyla" or "spsa"
    #[serde(default)]
    pub method: OptimizerMethod,

    /// Evaluation budget
    #[serde(default = "default_max_evaluations")]
    pub max_evaluations: usize,

    /// Minimum improvement counted as progress (COBYLA)
    #[serde(default = "default_tol")]
    pub tol: f64,

    /// Initial trust region radius (COBYLA)
    #[serde(default = "default_rhobeg")]
    pub rhobeg: f64,

    /// Final trust region radius (COBYLA)
    #[serde(default = "default_rhoend")]
    pub rhoend: f64,
}

/// Evaluation mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationKind {
    /// Statevector expectation
    #[default]
    Exact,
    /// Sampled expectation
    Shots,
}

/// Expectation evaluation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// "exact" or "shots"
    #[serde(default)]
    pub mode: EvaluationKind,

    /// Shots per measurement basis in shot mode
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Sampler seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Evolution-block synthesis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Product-formula order for non-commuting Hamiltonians
    #[serde(default)]
    pub order: TrotterOrder,

    /// Trotter steps per evolution block
    #[serde(default = "default_steps")]
    pub steps: usize,
}

// Default value functions
fn default_n_qubits() -> u32 {
    2
}

fn default_depth() -> usize {
    1
}

fn default_coupling() -> Vec<Vec<f64>> {
    vec![vec![0.0, 1.0], vec![0.0, 0.0]]
}

fn default_seed() -> u64 {
    42
}

fn default_max_evaluations() -> usize {
    1000
}

fn default_tol() -> f64 {
    1e-10
}

fn default_rhobeg() -> f64 {
    0.5
}

fn default_rhoend() -> f64 {
    1e-6
}

fn default_shots() -> u32 {
    1024
}

fn default_steps() -> usize {
    1
}

impl Default for ProblemConfig {
    fn default() -> Self {
        ProblemConfig {
            n_qubits: default_n_qubits(),
            depth: default_depth(),
            coupling: default_coupling(),
        }
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        InitConfig {
            strategy: InitStrategy::default(),
            seed: default_seed(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            method: OptimizerMethod::default(),
            max_evaluations: default_max_evaluations(),
            tol: default_tol(),
            rhobeg: default_rhobeg(),
            rhoend: default_rhoend(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            mode: EvaluationKind::default(),
            shots: default_shots(),
            seed: None,
        }
    }
}

impl Default for CircuitConfig {
    fn default() -> Self {
        CircuitConfig {
            order: TrotterOrder::default(),
            steps: default_steps(),
        }
    }
}

impl Default for QaoaConfig {
    fn default() -> Self {
        QaoaConfig {
            problem: ProblemConfig::default(),
            init: InitConfig::default(),
            optimizer: OptimizerConfig::default(),
            evaluation: EvaluationConfig::default(),
            circuit: CircuitConfig::default(),
        }
    }
}

impl QaoaConfig {
    /// Load configuration from a file: JSON when the extension is `.json`,
    /// YAML otherwise.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document. Not validated.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse a JSON document. Not validated.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => QaoaConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `VARQ_*` environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from `lookup`, keyed by environment variable name.
    ///
    /// Only variables that are set override the current values. Values that
    /// fail to parse are ignored with a warning.
    pub fn merge_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = parse_var(&lookup, "VARQ_DEPTH") {
            self.problem.depth = val;
        }
        if let Some(val) = parse_var(&lookup, "VARQ_SEED") {
            self.init.seed = val;
        }
        if let Some(val) = parse_var(&lookup, "VARQ_SHOTS") {
            self.evaluation.mode = EvaluationKind::Shots;
            self.evaluation.shots = val;
        }
        if let Some(val) = parse_var(&lookup, "VARQ_MAX_EVALUATIONS") {
            self.optimizer.max_evaluations = val;
        }
        if let Some(val) = parse_var(&lookup, "VARQ_TOL") {
            self.optimizer.tol = val;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.problem.n_qubits as usize;
        if n == 0 {
            return Err(ConfigError::ValidationError(
                "n_qubits must be greater than 0".to_string(),
            ));
        }

        // Coupling must be n×n
        if self.problem.coupling.len() != n {
            return Err(ConfigError::ValidationError(format!(
                "coupling has {} rows, expected {n}",
                self.problem.coupling.len()
            )));
        }
        if let Some((i, row)) = self
            .problem
            .coupling
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n)
        {
            return Err(ConfigError::ValidationError(format!(
                "coupling row {i} has {} entries, expected {n}",
                row.len()
            )));
        }
        if self.problem.coupling.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValidationError(
                "coupling entries must be finite".to_string(),
            ));
        }

        if let InitStrategy::Uniform { low, high } = self.init.strategy {
            if !(low.is_finite() && high.is_finite()) || low > high {
                return Err(ConfigError::ValidationError(format!(
                    "invalid uniform range [{low}, {high})"
                )));
            }
        }

        if self.optimizer.max_evaluations == 0 {
            return Err(ConfigError::ValidationError(
                "max_evaluations must be greater than 0".to_string(),
            ));
        }
        if self.optimizer.tol.is_nan() || self.optimizer.tol < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "tol must be non-negative, got {}",
                self.optimizer.tol
            )));
        }
        if self.optimizer.rhoend.is_nan()
            || self.optimizer.rhoend <= 0.0
            || self.optimizer.rhobeg < self.optimizer.rhoend
        {
            return Err(ConfigError::ValidationError(format!(
                "trust region needs rhobeg >= rhoend > 0, got rhobeg={} rhoend={}",
                self.optimizer.rhobeg, self.optimizer.rhoend
            )));
        }

        if self.evaluation.mode == EvaluationKind::Shots && self.evaluation.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0 in shot mode".to_string(),
            ));
        }

        if self.circuit.steps == 0 {
            return Err(ConfigError::ValidationError(
                "steps must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured optimizer.
    pub fn build_optimizer(&self) -> OptimizerChoice {
        let opt = &self.optimizer;
        match opt.method {
            OptimizerMethod::Cobyla => OptimizerChoice::Cobyla(
                Cobyla::new()
                    .with_max_evaluations(opt.max_evaluations)
                    .with_tol(opt.tol)
                    .with_trust_region(opt.rhobeg, opt.rhoend),
            ),
            OptimizerMethod::Spsa => OptimizerChoice::Spsa(
                Spsa::new()
                    .with_max_evaluations(opt.max_evaluations)
                    .with_seed(self.init.seed),
            ),
        }
    }

    /// The configured evaluation mode.
    pub fn evaluation_mode(&self) -> EvaluationMode {
        match self.evaluation.mode {
            EvaluationKind::Exact => EvaluationMode::Exact,
            EvaluationKind::Shots => EvaluationMode::Shots {
                shots: self.evaluation.shots,
            },
        }
    }

    /// The configured circuit factory.
    pub fn circuit_factory(&self) -> CircuitFactory {
        CircuitFactory::new()
            .with_order(self.circuit.order)
            .with_steps(self.circuit.steps)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(val) => Some(val),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The file or an environment value is not valid YAML/JSON for a config.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The config parsed but describes an unusable run.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
