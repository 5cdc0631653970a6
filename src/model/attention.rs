//! Multi-head self-attention and the flat per-head weight arena.
//!
//! Query/key/value projections for every `(layer, head)` live in one [`HeadArena`]
//! owned by the transformer; a [`MultiHeadAttention`] block holds only its layer's
//! shared output projection and borrows its heads from the arena at apply time.
//! Attention is unmasked: every position attends to every position.

use rand::Rng;

use super::error::{ModelError, ModelResult};
use super::matrix::Matrix;
use super::ops::{mat_mul, mat_vec_mul, scaled_dot_product, seq_mat_mul, softmax_rows};
use crate::config::{Config, INIT_STD};

/// Query, key and value projections of one head, each `dim × head_dim`.
#[derive(Clone, Debug)]
pub struct HeadProjection {
    pub wq: Matrix,
    pub wk: Matrix,
    pub wv: Matrix,
}

impl HeadProjection {
    fn random<R>(dim: usize, head_dim: usize, rng: &mut R) -> ModelResult<Self>
    where
        R: Rng + ?Sized,
    {
        Ok(HeadProjection {
            wq: Matrix::random(dim, head_dim, INIT_STD, rng)?,
            wk: Matrix::random(dim, head_dim, INIT_STD, rng)?,
            wv: Matrix::random(dim, head_dim, INIT_STD, rng)?,
        })
    }

    fn num_parameters(&self) -> usize {
        self.wq.len() + self.wk.len() + self.wv.len()
    }
}

/// Flat storage of every head's projections, slot `layer * num_heads + head`.
#[derive(Clone, Debug)]
pub struct HeadArena {
    num_heads: usize,
    slots: Vec<HeadProjection>,
}

impl HeadArena {
    /// Random projections for `num_layers × num_heads` heads, filled layer by layer.
    pub fn new<R>(config: &Config, rng: &mut R) -> ModelResult<Self>
    where
        R: Rng + ?Sized,
    {
        let count = config.num_layers * config.num_heads;
        let slots = (0..count)
            .map(|_| HeadProjection::random(config.embedding_dim, config.head_dim(), rng))
            .collect::<ModelResult<Vec<_>>>()?;
        Ok(HeadArena {
            num_heads: config.num_heads,
            slots,
        })
    }

    /// Builds an arena from explicit slots (`slots.len()` must be a multiple of `num_heads`).
    pub fn from_slots(num_heads: usize, slots: Vec<HeadProjection>) -> ModelResult<Self> {
        if num_heads == 0 || slots.len() % num_heads != 0 {
            return Err(ModelError::DimensionMismatch {
                op: "head_arena",
                expected: num_heads,
                found: slots.len(),
            });
        }
        Ok(HeadArena { num_heads, slots })
    }

    #[must_use]
    pub fn num_heads(&self) -> usize {
        self.num_heads
    }

    #[must_use]
    pub fn num_layers(&self) -> usize {
        self.slots.len() / self.num_heads
    }

    /// Projections of one head. Panics if `(layer, head)` is out of range.
    #[must_use]
    pub fn get(&self, layer: usize, head: usize) -> &HeadProjection {
        assert!(head < self.num_heads, "head {head} out of range");
        &self.slots[layer * self.num_heads + head]
    }

    /// All heads of `layer`, in head order.
    #[must_use]
    pub fn layer(&self, layer: usize) -> &[HeadProjection] {
        let start = layer * self.num_heads;
        &self.slots[start..start + self.num_heads]
    }

    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.slots.iter().map(HeadProjection::num_parameters).sum()
    }
}

/// One layer's attention block: head geometry plus the shared `dim × dim` output projection.
#[derive(Clone, Debug)]
pub struct MultiHeadAttention {
    head_dim: usize,
    wo: Matrix,
}

impl MultiHeadAttention {
    pub fn new<R>(config: &Config, rng: &mut R) -> ModelResult<Self>
    where
        R: Rng + ?Sized,
    {
        let dim = config.embedding_dim;
        Ok(MultiHeadAttention {
            head_dim: config.head_dim(),
            wo: Matrix::random(dim, dim, INIT_STD, rng)?,
        })
    }

    /// Builds the block from an explicit output projection.
    #[must_use]
    pub fn from_weights(head_dim: usize, wo: Matrix) -> Self {
        MultiHeadAttention { head_dim, wo }
    }

    #[must_use]
    pub fn wo(&self) -> &Matrix {
        &self.wo
    }

    #[must_use]
    pub fn head_dim(&self) -> usize {
        self.head_dim
    }

    /// Self-attention over `x` (`L × dim`) using `heads` for the projections.
    ///
    /// Per head: `softmax(Q·Kᵗ / √head_dim) · V`. Head outputs are concatenated per
    /// position (head 0 first) and mapped through the output projection. Returns
    /// `L × dim`.
    pub fn apply(&self, heads: &[HeadProjection], x: &[Vec<f64>]) -> ModelResult<Vec<Vec<f64>>> {
        let concat_width = heads.len() * self.head_dim;
        if concat_width != self.wo.cols() {
            return Err(ModelError::DimensionMismatch {
                op: "attention_heads",
                expected: self.wo.cols(),
                found: concat_width,
            });
        }

        let mut concat = vec![Vec::with_capacity(concat_width); x.len()];
        for head in heads {
            let q = seq_mat_mul(x, &head.wq)?;
            let k = seq_mat_mul(x, &head.wk)?;
            let v = seq_mat_mul(x, &head.wv)?;

            let weights = softmax_rows(&scaled_dot_product(&q, &k, self.head_dim));
            let head_out = mat_mul(&weights, &v)?;
            for (acc, part) in concat.iter_mut().zip(head_out) {
                acc.extend(part);
            }
        }

        concat.iter().map(|c| mat_vec_mul(&self.wo, c)).collect()
    }

    /// Attention weights of each head (`num_heads × L × L`), for inspection.
    pub fn attention_weights(
        &self,
        heads: &[HeadProjection],
        x: &[Vec<f64>],
    ) -> ModelResult<Vec<Vec<Vec<f64>>>> {
        heads
            .iter()
            .map(|head| {
                let q = seq_mat_mul(x, &head.wq)?;
                let k = seq_mat_mul(x, &head.wk)?;
                Ok(softmax_rows(&scaled_dot_product(&q, &k, self.head_dim)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn config() -> Config {
        Config {
            vocab_size: 5,
            embedding_dim: 4,
            num_heads: 2,
            num_layers: 3,
            seq_len: 8,
        }
    }

    fn identity(n: usize) -> Matrix {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.row_mut(i)[i] = 1.0;
        }
        m
    }

    #[test]
    fn arena_is_indexed_by_layer_and_head() {
        let cfg = config();
        let arena = HeadArena::new(&cfg, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(arena.num_layers(), 3);
        assert_eq!(arena.num_heads(), 2);
        assert_eq!(arena.layer(1).len(), 2);
        assert_eq!(arena.get(2, 1).wq.rows(), 4);
        assert_eq!(arena.get(2, 1).wq.cols(), 2);
        assert_eq!(arena.num_parameters(), 3 * 2 * 3 * 4 * 2);
        // slot (1, 0) is the first head of layer 1
        assert_eq!(arena.get(1, 0).wk, arena.layer(1)[0].wk);
    }

    #[test]
    fn arena_from_slots_checks_head_count() {
        let slot = HeadProjection {
            wq: Matrix::zeros(2, 1),
            wk: Matrix::zeros(2, 1),
            wv: Matrix::zeros(2, 1),
        };
        assert!(HeadArena::from_slots(2, vec![slot.clone()]).is_err());
        let arena = HeadArena::from_slots(2, vec![slot.clone(), slot]).unwrap();
        assert_eq!(arena.num_layers(), 1);
    }

    #[test]
    fn apply_preserves_shape_for_every_length() {
        let cfg = config();
        let mut rng = StdRng::seed_from_u64(6);
        let arena = HeadArena::new(&cfg, &mut rng).unwrap();
        let attn = MultiHeadAttention::new(&cfg, &mut rng).unwrap();
        for len in 1..=cfg.seq_len {
            let x: Vec<Vec<f64>> = (0..len)
                .map(|t| (0..4).map(|i| (t * 4 + i) as f64 * 0.1).collect())
                .collect();
            let out = attn.apply(arena.layer(0), &x).unwrap();
            assert_eq!(out.len(), len);
            assert!(out.iter().all(|row| row.len() == cfg.embedding_dim));
        }
    }

    #[test]
    fn attention_rows_are_stochastic_and_unmasked() {
        let cfg = config();
        let mut rng = StdRng::seed_from_u64(7);
        let arena = HeadArena::new(&cfg, &mut rng).unwrap();
        let attn = MultiHeadAttention::new(&cfg, &mut rng).unwrap();
        let x = vec![vec![1.0, 0.0, -1.0, 0.5], vec![0.2, 0.3, 0.1, 0.0], vec![2.0, 1.0, 0.0, -2.0]];
        let weights = attn.attention_weights(arena.layer(0), &x).unwrap();
        assert_eq!(weights.len(), 2);
        for head in weights {
            for row in head {
                assert_eq!(row.len(), 3);
                assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
                // the first position still attends to later ones
                assert!(row.iter().all(|&w| w > 0.0));
            }
        }
    }

    #[test]
    fn identical_positions_average_values() {
        // one head, dim 2, identity projections: equal inputs get uniform weights
        let head = HeadProjection {
            wq: identity(2),
            wk: identity(2),
            wv: identity(2),
        };
        let attn = MultiHeadAttention::from_weights(2, identity(2));
        let x = vec![vec![1.0, 2.0], vec![1.0, 2.0]];
        let out = attn.apply(std::slice::from_ref(&head), &x).unwrap();
        for row in out {
            assert!((row[0] - 1.0).abs() < 1e-12);
            assert!((row[1] - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn head_count_must_match_output_projection() {
        let cfg = config();
        let mut rng = StdRng::seed_from_u64(8);
        let arena = HeadArena::new(&cfg, &mut rng).unwrap();
        let attn = MultiHeadAttention::new(&cfg, &mut rng).unwrap();
        let x = vec![vec![0.0; 4]];
        let res = attn.apply(&arena.layer(0)[..1], &x);
        assert!(matches!(res, Err(ModelError::DimensionMismatch { .. })));
    }
}
