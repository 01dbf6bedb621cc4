//! Loading run configuration from files.

use std::path::PathBuf;
use varq::config::{EvaluationKind, OptimizerMethod};
use varq::{ConfigError, InitStrategy, QaoaConfig, QaoaError, QaoaRunner};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("varq-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn yaml_file_round_trip() {
    let path = write_temp(
        "run.yaml",
        r#"
problem:
  n_qubits: 2
  depth: 2
  coupling: [[0.0, 0.5], [0.0, 0.0]]
init:
  strategy:
    kind: linear
  seed: 3
optimizer:
  method: cobyla
  max_evaluations: 200
evaluation:
  mode: shots
  shots: 128
  seed: 4
"#,
    );
    let config = QaoaConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.problem.depth, 2);
    assert_eq!(config.init.strategy, InitStrategy::Linear);
    assert_eq!(config.optimizer.method, OptimizerMethod::Cobyla);
    assert_eq!(config.optimizer.max_evaluations, 200);
    assert_eq!(config.evaluation.mode, EvaluationKind::Shots);
    assert_eq!(config.evaluation.seed, Some(4));
}

#[test]
fn json_file_by_extension() {
    let path = write_temp(
        "run.json",
        r#"{
            "problem": {"n_qubits": 3, "depth": 1,
                        "coupling": [[0, 1, 0], [0, 0, 1], [0, 0, 0]]},
            "optimizer": {"method": "spsa", "max_evaluations": 90}
        }"#,
    );
    let config = QaoaConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.problem.n_qubits, 3);
    assert_eq!(config.optimizer.method, OptimizerMethod::Spsa);
    assert_eq!(config.init, QaoaConfig::default().init);
}

#[test]
fn invalid_file_fails_validation() {
    let path = write_temp("bad.yaml", "problem:\n  n_qubits: 3\n");
    let err = QaoaConfig::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    // Default coupling is 2×2.
    assert!(matches!(err, ConfigError::ValidationError(_)));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = write_temp("broken.json", "{\"problem\": ");
    let err = QaoaConfig::from_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn runner_rejects_invalid_config() {
    let mut config = QaoaConfig::default();
    config.optimizer.max_evaluations = 0;
    assert!(matches!(
        QaoaRunner::from_config(&config),
        Err(QaoaError::Config(ConfigError::ValidationError(_)))
    ));
}

#[test]
fn runner_rejects_self_coupling() {
    let mut config = QaoaConfig::default();
    config.problem.coupling = vec![vec![0.0, 1.0], vec![0.0, 2.0]];
    assert!(matches!(
        QaoaRunner::from_config(&config),
        Err(QaoaError::Hamiltonian(_))
    ));
}
