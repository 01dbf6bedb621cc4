//! Coupling matrices for Ising cost Hamiltonians.

use ndarray::Array2;

use crate::error::{SimError, SimResult};

/// Square matrix of pairwise coupling strengths, `J[i, j]` between qubit
/// `i` and qubit `j`.
///
/// Usually upper-triangular with a zero diagonal; both halves are read, so
/// a symmetric matrix couples each pair twice.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMatrix {
    j: Array2<f64>,
}

impl CouplingMatrix {
    /// Wrap an existing square array.
    pub fn from_array(j: Array2<f64>) -> SimResult<Self> {
        let (rows, cols) = j.dim();
        if rows != cols {
            return Err(SimError::DimensionMismatch {
                context: "coupling matrix columns",
                expected: rows,
                got: cols,
            });
        }
        Ok(Self { j })
    }

    /// Build from nested rows, e.g. `[[0, 1], [0, 0]]`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> SimResult<Self> {
        let n = rows.len();
        let mut flat = Vec::with_capacity(n * n);
        for row in &rows {
            if row.len() != n {
                return Err(SimError::DimensionMismatch {
                    context: "coupling matrix row length",
                    expected: n,
                    got: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let j = Array2::from_shape_vec((n, n), flat).map_err(|_| SimError::DimensionMismatch {
            context: "coupling matrix shape",
            expected: n * n,
            got: rows.iter().map(Vec::len).sum(),
        })?;
        Ok(Self { j })
    }

    /// Upper-triangular matrix with `strength` on every listed edge.
    pub fn from_edges(
        n_qubits: u32,
        edges: impl IntoIterator<Item = (u32, u32)>,
        strength: f64,
    ) -> SimResult<Self> {
        let n = n_qubits as usize;
        let mut j = Array2::zeros((n, n));
        for (a, b) in edges {
            for q in [a, b] {
                if q >= n_qubits {
                    return Err(SimError::InvalidIndex {
                        qubit: q,
                        n_qubits,
                        reason: "edge endpoint must be in [0, n_qubits)",
                    });
                }
            }
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            j[[lo as usize, hi as usize]] = strength;
        }
        Ok(Self { j })
    }

    /// Number of qubits (matrix dimension).
    pub fn n_qubits(&self) -> u32 {
        self.j.nrows() as u32
    }

    /// Entry `J[i, j]`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.j.get((i, j)).copied()
    }

    /// Underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.j
    }

    /// Non-zero entries `(i, j, J[i, j])` in row-major order, diagonal
    /// included.
    pub fn nonzero(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.j
            .indexed_iter()
            .filter(|(_, w)| **w != 0.0)
            .map(|((i, j), w)| (i as u32, j as u32, *w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = CouplingMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.0]]).unwrap_err();
        assert!(matches!(err, SimError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_array_rejects_non_square() {
        let err = CouplingMatrix::from_array(Array2::zeros((2, 3))).unwrap_err();
        assert!(matches!(
            err,
            SimError::DimensionMismatch {
                expected: 2,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_from_edges_is_upper_triangular() {
        let j = CouplingMatrix::from_edges(3, [(1, 0), (1, 2)], 0.5).unwrap();
        assert_eq!(j.get(0, 1), Some(0.5));
        assert_eq!(j.get(1, 0), Some(0.0));
        assert_eq!(j.get(1, 2), Some(0.5));
        let entries: Vec<_> = j.nonzero().collect();
        assert_eq!(entries, vec![(0, 1, 0.5), (1, 2, 0.5)]);
    }

    #[test]
    fn test_from_edges_rejects_out_of_range() {
        assert!(matches!(
            CouplingMatrix::from_edges(2, [(0, 2)], 1.0),
            Err(SimError::InvalidIndex { qubit: 2, .. })
        ));
    }
}
