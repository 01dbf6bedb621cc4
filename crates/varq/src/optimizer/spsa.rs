//! SPSA (Simultaneous Perturbation Stochastic Approximation) optimizer.
//!
//! Estimates the gradient from two evaluations along a random ±1
//! direction, so each iteration costs three evaluations regardless of
//! dimension.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Optimizer, OptimizerResult, TerminationReason, Tracked};

/// SPSA optimizer configuration.
#[derive(Debug, Clone)]
pub struct Spsa {
    /// Maximum number of objective evaluations.
    pub max_evaluations: usize,
    /// Initial step size for gradient estimation.
    pub a: f64,
    /// Perturbation size.
    pub c: f64,
    /// Learning rate decay parameter.
    pub alpha: f64,
    /// Perturbation decay parameter.
    pub gamma: f64,
    /// Seed of the perturbation directions.
    pub seed: u64,
}

impl Default for Spsa {
    fn default() -> Self {
        Self {
            max_evaluations: 1000,
            a: 0.1,
            c: 0.1,
            alpha: 0.602,
            gamma: 0.101,
            seed: 42,
        }
    }
}

impl Spsa {
    /// Create a new SPSA optimizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation budget.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Set the perturbation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Optimizer for Spsa {
    fn minimize<F, E>(&self, objective: F, x0: Vec<f64>) -> Result<OptimizerResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut f = Tracked::new(objective);
        let mut x = x0;
        let mut best_value = f.call(&x)?;
        let mut best = x.clone();
        let mut iterations = 0;

        while f.evaluations + 3 <= self.max_evaluations {
            let k = (iterations + 1) as f64;
            let a_k = self.a / k.powf(self.alpha);
            let c_k = self.c / k.powf(self.gamma);

            // Random perturbation direction
            let delta: Vec<f64> = x
                .iter()
                .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
                .collect();

            let x_plus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi + c_k * di).collect();
            let x_minus: Vec<f64> = x.iter().zip(&delta).map(|(xi, di)| xi - c_k * di).collect();
            let f_plus = f.call(&x_plus)?;
            let f_minus = f.call(&x_minus)?;

            let slope = (f_plus - f_minus) / (2.0 * c_k);
            for (xi, di) in x.iter_mut().zip(&delta) {
                *xi -= a_k * slope / di;
            }
            let f_x = f.call(&x)?;
            iterations += 1;

            for (value, point) in [(f_plus, &x_plus), (f_minus, &x_minus), (f_x, &x)] {
                if value < best_value {
                    best_value = value;
                    best.clone_from(point);
                }
            }
        }

        Ok(OptimizerResult {
            params: best,
            value: best_value,
            evaluations: f.evaluations,
            iterations,
            history: f.history,
            termination: TerminationReason::MaxEvaluations,
        })
    }
}
