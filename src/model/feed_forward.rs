//! Position-wise two-layer MLP.

use rand::Rng;

use super::error::ModelResult;
use super::matrix::Matrix;
use super::ops::{mat_vec_mul, relu, vec_mat_mul};
use crate::config::{Config, INIT_STD};

/// `out = relu(w_in · x) · w_out`, applied to every position independently.
///
/// Both weights are `hidden × dim` with `hidden = 4·dim`: `w_in` is applied as a
/// matrix-vector product into hidden space, `w_out` with the transposed-weight
/// product back into embedding space. Weights are fixed after construction.
#[derive(Clone, Debug)]
pub struct FeedForward {
    w_in: Matrix,
    w_out: Matrix,
}

impl FeedForward {
    /// Random `N(0, INIT_STD)` weights for the given model shape.
    pub fn new<R>(config: &Config, rng: &mut R) -> ModelResult<Self>
    where
        R: Rng + ?Sized,
    {
        let hidden = config.hidden_dim();
        let dim = config.embedding_dim;
        Ok(FeedForward {
            w_in: Matrix::random(hidden, dim, INIT_STD, rng)?,
            w_out: Matrix::random(hidden, dim, INIT_STD, rng)?,
        })
    }

    /// Builds the block from explicit weights (both `hidden × dim`).
    #[must_use]
    pub fn from_weights(w_in: Matrix, w_out: Matrix) -> Self {
        FeedForward { w_in, w_out }
    }

    #[must_use]
    pub fn w_in(&self) -> &Matrix {
        &self.w_in
    }

    #[must_use]
    pub fn w_out(&self) -> &Matrix {
        &self.w_out
    }

    /// Number of scalar weights.
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.w_in.len() + self.w_out.len()
    }

    /// Transforms one position.
    pub fn apply_vec(&self, x: &[f64]) -> ModelResult<Vec<f64>> {
        let hidden = relu(&mat_vec_mul(&self.w_in, x)?);
        vec_mat_mul(&hidden, &self.w_out)
    }

    /// Transforms every position of `x`.
    pub fn apply(&self, x: &[Vec<f64>]) -> ModelResult<Vec<Vec<f64>>> {
        x.iter().map(|row| self.apply_vec(row)).collect()
    }
}
