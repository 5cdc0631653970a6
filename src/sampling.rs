//! Vocabulary scoring, loss, and next-token selection.
//!
//! Scoring is weight-tied: the embedding table doubles as the output projection.

use rand::Rng;

use crate::model::ops::{dot, softmax};
use crate::model::{Matrix, ModelError, ModelResult};

/// Probability over the vocabulary: `softmax(embeddings · pooled)`.
///
/// # Errors
///
/// [`ModelError::DimensionMismatch`] when `pooled` is not as wide as an embedding row.
pub fn score(pooled: &[f64], embeddings: &Matrix) -> ModelResult<Vec<f64>> {
    if pooled.len() != embeddings.cols() {
        return Err(ModelError::DimensionMismatch {
            op: "score",
            expected: embeddings.cols(),
            found: pooled.len(),
        });
    }
    let logits: Vec<f64> = embeddings.iter_rows().map(|row| dot(pooled, row)).collect();
    Ok(softmax(&logits))
}

/// Mean squared error between `distribution` and the one-hot vector at `target`.
pub fn mse_loss(distribution: &[f64], target: usize) -> ModelResult<f64> {
    if target >= distribution.len() {
        return Err(ModelError::TokenOutOfRange {
            token: target,
            vocab_size: distribution.len(),
        });
    }
    let sum: f64 = distribution
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let diff = if i == target { p - 1.0 } else { p };
            diff * diff
        })
        .sum();
    Ok(sum / distribution.len() as f64)
}

/// Index of the highest score; the earliest index wins ties.
pub fn top1(scores: &[f64]) -> ModelResult<usize> {
    let (first, rest) = scores.split_first().ok_or(ModelError::EmptyDistribution)?;
    let mut best = 0;
    let mut best_val = *first;
    for (i, &v) in rest.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best = i + 1;
        }
    }
    Ok(best)
}

/// Samples among the `k` highest scores with weights `exp(score / temperature)`.
///
/// `k` is clamped to `[1, scores.len()]`. Weights are computed relative to the top
/// score, which leaves the renormalized distribution unchanged and keeps it finite
/// as `temperature` approaches zero. One uniform draw is walked along the cumulative
/// distribution; if rounding leaves it uncovered, the top-scoring index is returned.
///
/// # Errors
///
/// - [`ModelError::EmptyDistribution`] when `scores` is empty.
/// - [`ModelError::InvalidTemperature`] when `temperature` is not positive and finite.
pub fn top_k<R>(scores: &[f64], k: usize, temperature: f64, rng: &mut R) -> ModelResult<usize>
where
    R: Rng + ?Sized,
{
    if scores.is_empty() {
        return Err(ModelError::EmptyDistribution);
    }
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(ModelError::InvalidTemperature(temperature));
    }

    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    // stable: equal scores keep index order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k.clamp(1, scores.len()));

    let top = ranked[0].1;
    let weights: Vec<f64> = ranked
        .iter()
        .map(|&(_, s)| ((s - top) / temperature).exp())
        .collect();
    let total: f64 = weights.iter().sum();

    let r: f64 = rng.random();
    let mut acc = 0.0;
    for (&(index, _), w) in ranked.iter().zip(&weights) {
        acc += w / total;
        if r <= acc {
            return Ok(index);
        }
    }
    Ok(ranked[0].0)
}
