//! Math primitives: vector and matrix products, softmax, ReLU, pooling, positional encoding.
//!
//! A sequence is a slice of per-position vectors (`&[Vec<f64>]`, shape `L × dim`).

use super::error::{ModelError, ModelResult};
use super::matrix::Matrix;

/// Dot product over the common prefix of `a` and `b`.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Element-wise `a + b`.
#[must_use]
pub fn vec_add(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// Position-wise `a[t] + b[t]` over two sequences of equal length.
#[must_use]
pub fn add_rows(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    a.iter().zip(b).map(|(x, y)| vec_add(x, y)).collect()
}

/// `W · x`: `W` is `r × c`, `x` has length `c`, result has length `r`.
///
/// # Errors
///
/// [`ModelError::DimensionMismatch`] when `W.cols() != x.len()`.
pub fn mat_vec_mul(w: &Matrix, x: &[f64]) -> ModelResult<Vec<f64>> {
    if w.cols() != x.len() {
        return Err(ModelError::DimensionMismatch {
            op: "mat_vec_mul",
            expected: w.cols(),
            found: x.len(),
        });
    }
    Ok(w.iter_rows().map(|row| dot(row, x)).collect())
}

/// `x · W` (transposed-weight product): `x` has length `r`, `W` is `r × c`, result has length `c`.
///
/// # Errors
///
/// [`ModelError::DimensionMismatch`] when `W.rows() != x.len()`.
pub fn vec_mat_mul(x: &[f64], w: &Matrix) -> ModelResult<Vec<f64>> {
    if w.rows() != x.len() {
        return Err(ModelError::DimensionMismatch {
            op: "vec_mat_mul",
            expected: w.rows(),
            found: x.len(),
        });
    }
    let mut out = vec![0.0; w.cols()];
    for (xi, row) in x.iter().zip(w.iter_rows()) {
        for (o, wij) in out.iter_mut().zip(row) {
            *o += xi * wij;
        }
    }
    Ok(out)
}

/// Applies [`vec_mat_mul`] to every position: `L × r` by `r × c` gives `L × c`.
pub fn seq_mat_mul(x: &[Vec<f64>], w: &Matrix) -> ModelResult<Vec<Vec<f64>>> {
    x.iter().map(|row| vec_mat_mul(row, w)).collect()
}

/// `A · B` for row-vector sequences: `A` is `L × n`, `B` is `n × m`, result is `L × m`.
///
/// # Errors
///
/// [`ModelError::DimensionMismatch`] when a row of `A` does not have `B.len()` entries.
pub fn mat_mul(a: &[Vec<f64>], b: &[Vec<f64>]) -> ModelResult<Vec<Vec<f64>>> {
    let shared = b.len();
    let cols = b.first().map_or(0, Vec::len);
    a.iter()
        .map(|row| {
            if row.len() != shared {
                return Err(ModelError::DimensionMismatch {
                    op: "mat_mul",
                    expected: shared,
                    found: row.len(),
                });
            }
            let mut out = vec![0.0; cols];
            for (aik, b_row) in row.iter().zip(b) {
                for (o, bkj) in out.iter_mut().zip(b_row) {
                    *o += aik * bkj;
                }
            }
            Ok(out)
        })
        .collect()
}

/// `Q · Kᵗ / √d`: every query against every key, shape `L × L`.
#[must_use]
pub fn scaled_dot_product(q: &[Vec<f64>], k: &[Vec<f64>], d: usize) -> Vec<Vec<f64>> {
    let scale = 1.0 / (d as f64).sqrt();
    q.iter()
        .map(|qi| k.iter().map(|kj| dot(qi, kj) * scale).collect())
        .collect()
}

/// Softmax with max subtraction. Empty input gives an empty output.
#[must_use]
pub fn softmax(x: &[f64]) -> Vec<f64> {
    let max_val = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = x.iter().map(|&v| (v - max_val).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Row-wise [`softmax`].
#[must_use]
pub fn softmax_rows(x: &[Vec<f64>]) -> Vec<Vec<f64>> {
    x.iter().map(|row| softmax(row)).collect()
}

/// `max(0, x)` element-wise.
#[must_use]
pub fn relu(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| v.max(0.0)).collect()
}

/// Averages a sequence of vectors into one vector of the same width.
///
/// # Errors
///
/// [`ModelError::EmptySequence`] when `x` has no positions.
pub fn mean_pool(x: &[Vec<f64>]) -> ModelResult<Vec<f64>> {
    let first = x.first().ok_or(ModelError::EmptySequence)?;
    let mut out = vec![0.0; first.len()];
    for row in x {
        for (o, v) in out.iter_mut().zip(row) {
            *o += v;
        }
    }
    let n = x.len() as f64;
    out.iter_mut().for_each(|o| *o /= n);
    Ok(out)
}

/// Sinusoidal encoding of position `pos` over `dim` dimensions.
///
/// `angle = pos / 10000^(2·⌊i/2⌋ / dim)`; even `i` takes the sine, odd `i` the cosine.
#[must_use]
pub fn sinusoidal_encoding(pos: usize, dim: usize) -> Vec<f64> {
    (0..dim)
        .map(|i| {
            let exponent = (2 * (i / 2)) as f64 / dim as f64;
            let angle = pos as f64 / 10000f64.powf(exponent);
            if i % 2 == 0 {
                angle.sin()
            } else {
                angle.cos()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn dot_and_add() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(vec_add(&[1.0, 2.0], &[0.5, -2.0]), vec![1.5, 0.0]);
        let sum = add_rows(&[vec![1.0], vec![2.0]], &[vec![10.0], vec![20.0]]);
        assert_eq!(sum, vec![vec![11.0], vec![22.0]]);
    }

    #[test]
    fn mat_vec_mul_computes_rows() {
        let w = Matrix::from_rows(vec![vec![0.5, 0.5], vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();
        let out = mat_vec_mul(&w, &[1.0, 2.0]).unwrap();
        assert_eq!(out, vec![1.5, 1.0, 4.0]);
    }

    #[test]
    fn mat_vec_mul_rejects_wrong_width() {
        let w = Matrix::zeros(3, 2);
        let err = mat_vec_mul(&w, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                op: "mat_vec_mul",
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn vec_mat_mul_is_transposed_product() {
        // x (len 3) · W (3 × 2)
        let w = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let out = vec_mat_mul(&[1.0, 0.0, -1.0], &w).unwrap();
        assert_eq!(out, vec![-4.0, -4.0]);
        assert!(vec_mat_mul(&[1.0, 2.0], &w).is_err());
    }

    #[test]
    fn seq_mat_mul_maps_every_position() {
        let w = Matrix::from_rows(vec![vec![1.0, 0.0, 2.0], vec![0.0, 1.0, 0.0]]).unwrap();
        let out = seq_mat_mul(&[vec![1.0, 1.0], vec![2.0, 0.0]], &w).unwrap();
        assert_eq!(out, vec![vec![1.0, 1.0, 2.0], vec![2.0, 0.0, 4.0]]);
    }

    #[test]
    fn mat_mul_shapes_and_values() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 1.0]];
        let out = mat_mul(&a, &b).unwrap();
        assert_eq!(out, vec![vec![2.0, 1.0, 2.0], vec![4.0, 3.0, 4.0]]);
        assert!(mat_mul(&[vec![1.0]], &b).is_err());
    }

    #[test]
    fn scaled_dot_product_divides_by_sqrt_d() {
        let q = vec![vec![1.0, 1.0, 1.0, 1.0]];
        let k = vec![vec![1.0, 1.0, 1.0, 1.0], vec![0.0, 0.0, 0.0, 0.0]];
        let scores = scaled_dot_product(&q, &k, 4);
        assert_eq!(scores, vec![vec![2.0, 0.0]]);
    }

    #[test]
    fn softmax_is_a_distribution() {
        let mut rng = StdRng::seed_from_u64(3);
        for len in 1..20 {
            let x: Vec<f64> = (0..len).map(|_| rng.random_range(-50.0..50.0)).collect();
            let p = softmax(&x);
            assert_eq!(p.len(), len);
            assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
            let sum: f64 = p.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
        }
    }

    #[test]
    fn softmax_survives_large_inputs() {
        let p = softmax(&[1000.0, 1000.0]);
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn relu_zeroes_negatives() {
        assert_eq!(relu(&[-1.0, 0.0, 2.5]), vec![0.0, 0.0, 2.5]);
    }

    #[test]
    fn mean_pool_averages_positions() {
        let x = vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0]];
        assert_eq!(mean_pool(&x).unwrap(), vec![2.0, 3.0, 4.0]);
        for len in 1..6 {
            let rows = vec![vec![1.0; 7]; len];
            assert_eq!(mean_pool(&rows).unwrap().len(), 7);
        }
        assert_eq!(mean_pool(&[]), Err(ModelError::EmptySequence));
    }

    #[test]
    fn sinusoidal_encoding_matches_formula() {
        let p0 = sinusoidal_encoding(0, 4);
        assert_eq!(p0, vec![0.0, 1.0, 0.0, 1.0]);

        let p1 = sinusoidal_encoding(1, 4);
        assert!((p1[0] - 1f64.sin()).abs() < 1e-12);
        assert!((p1[1] - 1f64.cos()).abs() < 1e-12);
        // i = 2, 3 share the exponent 2/4
        let angle = 1.0 / 10000f64.powf(0.5);
        assert!((p1[2] - angle.sin()).abs() < 1e-12);
        assert!((p1[3] - angle.cos()).abs() < 1e-12);
    }
}
