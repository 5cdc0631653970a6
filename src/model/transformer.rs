//! Transformer composition: tables, layers, and the forward pass.

use log::debug;
use rand::Rng;

use super::attention::{HeadArena, MultiHeadAttention};
use super::error::{ModelError, ModelResult};
use super::feed_forward::FeedForward;
use super::layer_norm::LayerNorm;
use super::matrix::Matrix;
use super::ops::{add_rows, mean_pool, sinusoidal_encoding, vec_add};
use crate::config::{Config, INIT_STD};

/// One encoder layer. The single [`LayerNorm`] is applied after attention and again
/// after the feed-forward block.
#[derive(Clone, Debug)]
pub struct Layer {
    pub attention: MultiHeadAttention,
    pub feed_forward: FeedForward,
    pub norm: LayerNorm,
}

/// Encoder over one token sequence, pooled to a single vector.
///
/// Owns the embedding table (`vocab_size × dim`, the only state mutated after
/// construction), the sinusoidal positional table (`seq_len × dim`), the per-head
/// projection arena, and `num_layers` layers.
#[derive(Clone, Debug)]
pub struct Transformer {
    config: Config,
    embeddings: Matrix,
    positions: Matrix,
    heads: HeadArena,
    layers: Vec<Layer>,
}

impl Transformer {
    /// Builds a model with random weights drawn from `rng`.
    ///
    /// Draw order is fixed (embeddings, head arena, then each layer's output projection
    /// and feed-forward weights), so a seeded generator reproduces the same model.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidConfig`] when `config` fails [`Config::validate`].
    pub fn new<R>(config: Config, rng: &mut R) -> ModelResult<Self>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let dim = config.embedding_dim;

        let embeddings = Matrix::random(config.vocab_size, dim, INIT_STD, rng)?;
        let positions = Matrix::from_rows(
            (0..config.seq_len)
                .map(|pos| sinusoidal_encoding(pos, dim))
                .collect(),
        )?;
        let heads = HeadArena::new(&config, rng)?;
        let layers = (0..config.num_layers)
            .map(|_| -> ModelResult<Layer> {
                Ok(Layer {
                    attention: MultiHeadAttention::new(&config, rng)?,
                    feed_forward: FeedForward::new(&config, rng)?,
                    norm: LayerNorm::default(),
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;

        let model = Transformer {
            config,
            embeddings,
            positions,
            heads,
            layers,
        };
        debug!(
            "transformer: vocab={} dim={} heads={} layers={} seq_len={} params={}",
            config.vocab_size,
            config.embedding_dim,
            config.num_heads,
            config.num_layers,
            config.seq_len,
            model.num_parameters()
        );
        Ok(model)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Embedding table; doubles as the output projection for vocabulary scoring.
    #[must_use]
    pub fn embeddings(&self) -> &Matrix {
        &self.embeddings
    }

    /// Exclusive access to the embedding table for training updates.
    pub fn embeddings_mut(&mut self) -> &mut Matrix {
        &mut self.embeddings
    }

    #[must_use]
    pub fn positions(&self) -> &Matrix {
        &self.positions
    }

    #[must_use]
    pub fn heads(&self) -> &HeadArena {
        &self.heads
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of scalar weights (the positional table is not a parameter).
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.embeddings.len()
            + self.heads.num_parameters()
            + self
                .layers
                .iter()
                .map(|l| l.attention.wo().len() + l.feed_forward.num_parameters())
                .sum::<usize>()
    }

    /// Per-position representation after all layers (`L × dim`).
    ///
    /// # Errors
    ///
    /// - [`ModelError::EmptySequence`] when `tokens` is empty.
    /// - [`ModelError::SequenceTooLong`] when `tokens.len() > seq_len`.
    /// - [`ModelError::TokenOutOfRange`] when an id is not below `vocab_size`.
    pub fn encode(&self, tokens: &[usize]) -> ModelResult<Vec<Vec<f64>>> {
        if tokens.is_empty() {
            return Err(ModelError::EmptySequence);
        }
        if tokens.len() > self.config.seq_len {
            return Err(ModelError::SequenceTooLong {
                len: tokens.len(),
                max: self.config.seq_len,
            });
        }

        let mut x = tokens
            .iter()
            .enumerate()
            .map(|(pos, &token)| {
                if token >= self.config.vocab_size {
                    return Err(ModelError::TokenOutOfRange {
                        token,
                        vocab_size: self.config.vocab_size,
                    });
                }
                Ok(vec_add(self.embeddings.row(token), self.positions.row(pos)))
            })
            .collect::<ModelResult<Vec<_>>>()?;

        for (li, layer) in self.layers.iter().enumerate() {
            let attn = layer.attention.apply(self.heads.layer(li), &x)?;
            let normed = layer.norm.normalize(&add_rows(&x, &attn));
            let ff = layer.feed_forward.apply(&normed)?;
            x = layer.norm.normalize(&add_rows(&normed, &ff));
        }
        Ok(x)
    }

    /// Forward pass: [`encode`](Self::encode) then mean-pool into one `dim`-length vector.
    pub fn forward(&self, tokens: &[usize]) -> ModelResult<Vec<f64>> {
        mean_pool(&self.encode(tokens)?)
    }
}
