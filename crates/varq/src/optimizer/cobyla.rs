//! COBYLA-style (Constrained Optimization BY Linear Approximation) optimizer.
//!
//! Unconstrained variant. Keeps a simplex of n+1 points no further than
//! 2ρ from its best vertex, fits the linear model through them, and steps
//! a distance ρ down the model gradient:
//!
//! - a step that improves the best value by at least `tol` replaces the
//!   worst vertex;
//! - otherwise the simplex is rebuilt around the best point at radius ρ,
//!   and if a freshly built simplex still cannot progress, ρ is halved;
//! - the search converges once a fresh simplex at ρ = `rhoend` stalls.

use super::{Optimizer, OptimizerResult, TerminationReason, Tracked};

/// COBYLA optimizer configuration.
#[derive(Debug, Clone)]
pub struct Cobyla {
    /// Maximum number of objective evaluations.
    pub max_evaluations: usize,
    /// Minimum improvement for a step to count as progress.
    pub tol: f64,
    /// Initial trust region radius.
    pub rhobeg: f64,
    /// Final trust region radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            max_evaluations: 1000,
            tol: 1e-10,
            rhobeg: 0.5,
            rhoend: 1e-6,
        }
    }
}

impl Cobyla {
    /// Create a new COBYLA optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation budget.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set trust region parameters.
    pub fn with_trust_region(mut self, rhobeg: f64, rhoend: f64) -> Self {
        self.rhobeg = rhobeg;
        self.rhoend = rhoend;
        self
    }
}

impl Optimizer for Cobyla {
    fn minimize<F, E>(&self, objective: F, x0: Vec<f64>) -> Result<OptimizerResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let n = x0.len();
        let mut f = Tracked::new(objective);
        let f0 = f.call(&x0)?;
        if n == 0 {
            return Ok(OptimizerResult {
                params: x0,
                value: f0,
                evaluations: f.evaluations,
                iterations: 0,
                history: f.history,
                termination: TerminationReason::Converged,
            });
        }

        let mut rho = self.rhobeg;
        let mut simplex = Simplex::build(&mut f, x0, f0, rho)?;
        let mut fresh = true;
        let mut iterations = 0;
        let mut termination = TerminationReason::MaxEvaluations;

        while f.evaluations < self.max_evaluations {
            let b = simplex.best();
            let gradient = if simplex.radius(b) <= 2.0 * rho {
                simplex.linear_gradient(b)
            } else {
                None
            };

            // Degenerate or stretched geometry: rebuild around the best point.
            let Some(g) = gradient else {
                if f.evaluations + n > self.max_evaluations {
                    break;
                }
                simplex = simplex.rebuild(&mut f, rho)?;
                fresh = true;
                continue;
            };

            let norm = g.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                let trial: Vec<f64> = simplex.points[b]
                    .iter()
                    .zip(&g)
                    .map(|(x, gi)| x - rho * gi / norm)
                    .collect();
                let f_trial = f.call(&trial)?;
                let f_best = simplex.values[b];
                if f_best - f_trial >= self.tol {
                    simplex.replace_worst(trial, f_trial);
                    fresh = false;
                    iterations += 1;
                    continue;
                }
                if f_trial < f_best {
                    simplex.replace_worst(trial, f_trial);
                }
            }

            if !fresh {
                if f.evaluations + n > self.max_evaluations {
                    break;
                }
                simplex = simplex.rebuild(&mut f, rho)?;
                fresh = true;
                continue;
            }

            if rho <= self.rhoend {
                termination = TerminationReason::Converged;
                break;
            }
            rho = (rho * 0.5).max(self.rhoend);
            if f.evaluations + n > self.max_evaluations {
                break;
            }
            simplex = simplex.rebuild(&mut f, rho)?;
        }

        let b = simplex.best();
        Ok(OptimizerResult {
            params: simplex.points.swap_remove(b),
            value: simplex.values[b],
            evaluations: f.evaluations,
            iterations,
            history: f.history,
            termination,
        })
    }
}

/// n+1 points and their objective values.
struct Simplex {
    points: Vec<Vec<f64>>,
    values: Vec<f64>,
}

impl Simplex {
    /// `center` plus `rho` along each coordinate axis.
    fn build<F, E>(f: &mut Tracked<F>, center: Vec<f64>, f_center: f64, rho: f64) -> Result<Self, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let n = center.len();
        let mut points = Vec::with_capacity(n + 1);
        let mut values = Vec::with_capacity(n + 1);
        for i in 0..n {
            let mut point = center.clone();
            point[i] += rho;
            values.push(f.call(&point)?);
            points.push(point);
        }
        points.insert(0, center);
        values.insert(0, f_center);
        Ok(Self { points, values })
    }

    fn rebuild<F, E>(self, f: &mut Tracked<F>, rho: f64) -> Result<Self, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let b = self.best();
        let f_best = self.values[b];
        let mut points = self.points;
        Self::build(f, points.swap_remove(b), f_best, rho)
    }

    fn best(&self) -> usize {
        self.values
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0, |(i, _)| i)
    }

    fn worst(&self) -> usize {
        self.values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0, |(i, _)| i)
    }

    fn replace_worst(&mut self, point: Vec<f64>, value: f64) {
        let w = self.worst();
        self.points[w] = point;
        self.values[w] = value;
    }

    /// Largest distance from vertex `b` to any other vertex.
    fn radius(&self, b: usize) -> f64 {
        let center = &self.points[b];
        self.points
            .iter()
            .map(|p| {
                p.iter()
                    .zip(center)
                    .map(|(x, c)| (x - c) * (x - c))
                    .sum::<f64>()
                    .sqrt()
            })
            .fold(0.0, f64::max)
    }

    /// Gradient of the linear interpolant through all vertices, or `None`
    /// if the vertices are (numerically) affinely dependent.
    fn linear_gradient(&self, b: usize) -> Option<Vec<f64>> {
        let center = &self.points[b];
        let f_center = self.values[b];
        let mut rows = Vec::with_capacity(center.len());
        let mut rhs = Vec::with_capacity(center.len());
        for (i, (point, value)) in self.points.iter().zip(&self.values).enumerate() {
            if i == b {
                continue;
            }
            rows.push(point.iter().zip(center).map(|(x, c)| x - c).collect());
            rhs.push(value - f_center);
        }
        solve_linear(rows, rhs)
    }
}

/// Gaussian elimination with partial pivoting.
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f64, |m, v| m.max(v.abs()))
        .max(f64::MIN_POSITIVE);

    for col in 0..n {
        let pivot = (col..n).max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))?;
        if a[pivot][col].abs() <= 1e-12 * scale {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn quadratic(params: &[f64]) -> Result<f64, Infallible> {
        Ok((params[0] - 1.0).powi(2) + (params[1] - 2.0).powi(2))
    }

    #[test]
    fn test_cobyla_simple() {
        let cobyla = Cobyla::new().with_max_evaluations(200);

        // Minimize (x-1)^2 + (y-2)^2
        let result = cobyla.minimize(quadratic, vec![0.0, 0.0]).unwrap();

        assert!(result.value < 1e-8);
        assert!((result.params[0] - 1.0).abs() < 1e-4);
        assert!((result.params[1] - 2.0).abs() < 1e-4);
        assert_eq!(result.termination, TerminationReason::Converged);
        assert_eq!(result.history.len(), result.evaluations);
    }

    #[test]
    fn test_cobyla_rosenbrock() {
        let cobyla = Cobyla::new().with_max_evaluations(500);

        // Rosenbrock function (minimum at (1, 1))
        let result = cobyla
            .minimize(
                |params: &[f64]| -> Result<f64, Infallible> {
                    let x = params[0];
                    let y = params[1];
                    Ok((1.0 - x).powi(2) + 100.0 * (y - x.powi(2)).powi(2))
                },
                vec![0.0, 0.0],
            )
            .unwrap();

        // Rosenbrock is hard, just check we improved
        assert!(result.value < 1.0);
        assert!(result.evaluations <= 500);
    }

    #[test]
    fn test_budget_exhaustion_reports_max_evaluations() {
        let cobyla = Cobyla::new().with_max_evaluations(10);
        let result = cobyla.minimize(quadratic, vec![0.0, 0.0]).unwrap();
        assert_eq!(result.termination, TerminationReason::MaxEvaluations);
        assert!(result.evaluations <= 10);
        // Best value never exceeds the starting value.
        assert!(result.value <= 5.0);
    }

    #[test]
    fn test_objective_error_aborts() {
        let mut calls = 0;
        let result = Cobyla::new().minimize(
            |_: &[f64]| {
                calls += 1;
                if calls == 3 { Err("offline") } else { Ok(1.0) }
            },
            vec![0.0, 0.0],
        );
        assert_eq!(result.unwrap_err(), "offline");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_zero_dimensional_problem() {
        let result = Cobyla::new()
            .minimize(|_: &[f64]| -> Result<f64, Infallible> { Ok(4.0) }, vec![])
            .unwrap();
        assert_eq!(result.evaluations, 1);
        assert_eq!(result.value, 4.0);
        assert_eq!(result.termination, TerminationReason::Converged);
    }

    #[test]
    fn test_solve_linear_singular() {
        assert!(solve_linear(vec![vec![1.0, 2.0], vec![2.0, 4.0]], vec![1.0, 2.0]).is_none());
        let x = solve_linear(vec![vec![0.0, 2.0], vec![4.0, 0.0]], vec![2.0, 8.0]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 1.0).abs() < 1e-12);
    }
}
