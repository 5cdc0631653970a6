//! Dense row-major matrix of `f64`.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::error::{ModelError, ModelResult};

/// Row-major `rows × cols` matrix backed by one contiguous buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// All-zero matrix.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Matrix with entries drawn from `N(0, std)`.
    pub fn random<R>(rows: usize, cols: usize, std: f64, rng: &mut R) -> ModelResult<Self>
    where
        R: Rng + ?Sized,
    {
        let normal = Normal::new(0.0, std).map_err(|e| ModelError::Init(e.to_string()))?;
        let data = (0..rows * cols).map(|_| normal.sample(rng)).collect();
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from equally long rows.
    ///
    /// # Errors
    ///
    /// [`ModelError::DimensionMismatch`] when a row's length differs from the first row's.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> ModelResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n = rows.len();
        let mut data = Vec::with_capacity(n * cols);
        for row in rows {
            if row.len() != cols {
                return Err(ModelError::DimensionMismatch {
                    op: "from_rows",
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Matrix {
            rows: n,
            cols,
            data,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i` as a slice. Panics if `i >= rows`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Mutable row `i`. Panics if `i >= rows`.
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Entry at `(r, c)`.
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; a zero-width matrix has no meaningful rows to yield
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rows copied into owned vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn from_rows_and_access() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.get(2, 0), 5.0);
        assert_eq!(m.iter_rows().count(), 3);
        assert_eq!(m.to_rows()[2], vec![5.0, 6.0]);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let res = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            res,
            Err(ModelError::DimensionMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn random_is_reproducible_for_same_seed() {
        let a = Matrix::random(3, 4, 0.02, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Matrix::random(3, 4, 0.02, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(a.iter_rows().flatten().all(|v| v.abs() < 0.2));
    }

    #[test]
    fn random_rejects_invalid_std() {
        let res = Matrix::random(2, 2, f64::NAN, &mut StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(ModelError::Init(_))));
    }

    #[test]
    fn row_mut_writes_through() {
        let mut m = Matrix::zeros(2, 3);
        m.row_mut(1)[2] = 9.0;
        assert_eq!(m.get(1, 2), 9.0);
        assert_eq!(m.row(0), &[0.0, 0.0, 0.0]);
    }
}
