//! Initial QAOA parameters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::params::ParameterVector;

/// Strategy for initializing QAOA parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitStrategy {
    /// Independent uniform draws from `[low, high)`, seeded.
    Uniform {
        /// Inclusive lower bound.
        low: f64,
        /// Exclusive upper bound.
        high: f64,
    },
    /// Linear interpolation: gamma increases, beta decreases.
    Linear,
    /// Fixed values: all gamma and beta are the same.
    Fixed,
    /// Trotterized adiabatic: mimics adiabatic evolution.
    TrotterizedAdiabatic,
}

impl Default for InitStrategy {
    fn default() -> Self {
        InitStrategy::Uniform { low: 0.0, high: PI }
    }
}

/// Initial `[γ…, β…]` for depth `p`.
///
/// `seed` only affects [`InitStrategy::Uniform`]; γ values are drawn
/// before β values.
pub fn initial_parameters(p: usize, strategy: InitStrategy, seed: u64) -> ParameterVector {
    let (gamma, beta): (Vec<f64>, Vec<f64>) = match strategy {
        InitStrategy::Uniform { low, high } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut draw = || {
                if high > low {
                    rng.gen_range(low..high)
                } else {
                    low
                }
            };
            let gamma = (0..p).map(|_| draw()).collect();
            let beta = (0..p).map(|_| draw()).collect();
            (gamma, beta)
        }
        InitStrategy::Linear => {
            // gamma starts small and increases, beta starts large and decreases
            let gamma = (0..p)
                .map(|i| PI / 4.0 * (i + 1) as f64 / p as f64)
                .collect();
            let beta = (0..p)
                .map(|i| PI / 4.0 * (p - i) as f64 / p as f64)
                .collect();
            (gamma, beta)
        }
        InitStrategy::Fixed => (vec![PI / 4.0; p], vec![PI / 8.0; p]),
        InitStrategy::TrotterizedAdiabatic => {
            // s runs from 0 to 1; gamma ~ s, beta ~ (1 - s)
            let dt = 1.0 / (p + 1) as f64;
            let gamma = (1..=p).map(|i| i as f64 * dt * PI / 2.0 * dt).collect();
            let beta = (1..=p)
                .map(|i| (1.0 - i as f64 * dt) * PI / 2.0 * dt)
                .collect();
            (gamma, beta)
        }
    };
    ParameterVector::from_angles(&gamma, &beta)
}
