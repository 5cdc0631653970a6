//! Configuration for the model shape and for a training / inference run.
//!
//! [`Config`] is the five-field model shape consumed by
//! [`Transformer::new`](crate::model::Transformer::new). [`RunConfig`] carries everything a
//! binary needs (seed, corpus, training and sampling knobs) and is loaded via [`from_env`].
//! Default values and env key names are centralized in the `constants` submodule.

mod builder;
mod constants;
mod error;

use std::path::PathBuf;

use constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE, DEFAULT_NUM_HEADS,
    DEFAULT_NUM_LAYERS, DEFAULT_PROMPT, DEFAULT_SEED, DEFAULT_SEQ_LEN, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_K, DEFAULT_VOCAB_LIMIT, DEFAULT_VOCAB_SIZE,
};

pub use builder::{env_key, env_parsed, env_string, from_env};
pub use constants::{FF_MULTIPLIER, INIT_STD, LAYER_NORM_EPS};
pub use error::ConfigError;

/// Model shape.
///
/// `embedding_dim` must be divisible by `num_heads`; `seq_len` is the longest token
/// sequence a forward pass accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of vocabulary entries (rows of the embedding table).
    pub vocab_size: usize,
    /// Width of every token representation.
    pub embedding_dim: usize,
    /// Number of attention heads per layer.
    pub num_heads: usize,
    /// Number of (attention, feed-forward, layer norm) layers.
    pub num_layers: usize,
    /// Maximum sequence length (rows of the positional table).
    pub seq_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocab_size: DEFAULT_VOCAB_SIZE,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            num_heads: DEFAULT_NUM_HEADS,
            num_layers: DEFAULT_NUM_LAYERS,
            seq_len: DEFAULT_SEQ_LEN,
        }
    }
}

impl Config {
    /// Validates the model shape. Returns `Ok(())` if valid, or a [`ConfigError::Validation`].
    ///
    /// Ensures every field is positive and `embedding_dim` is divisible by `num_heads`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("vocab_size", self.vocab_size),
            ("embedding_dim", self.embedding_dim),
            ("num_heads", self.num_heads),
            ("num_layers", self.num_layers),
            ("seq_len", self.seq_len),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be greater than 0"
                )));
            }
        }
        if self.embedding_dim % self.num_heads != 0 {
            return Err(ConfigError::Validation(format!(
                "embedding_dim ({}) must be divisible by num_heads ({})",
                self.embedding_dim, self.num_heads
            )));
        }
        Ok(())
    }

    /// Head dimension (`embedding_dim / num_heads`).
    #[must_use]
    pub fn head_dim(&self) -> usize {
        self.embedding_dim / self.num_heads
    }

    /// Feed-forward hidden width.
    #[must_use]
    pub fn hidden_dim(&self) -> usize {
        FF_MULTIPLIER * self.embedding_dim
    }
}

/// Settings for one run of the `train` or `infer` binary.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Seed for the single injected RNG.
    pub seed: u64,
    /// Corpus file (one document per line). `None` uses the built-in corpus.
    pub corpus_path: Option<PathBuf>,
    /// Upper bound on the tokenizer vocabulary, `<unk>` included.
    pub vocab_limit: usize,

    /// Embedding dimension (must be divisible by `num_heads`).
    pub embedding_dim: usize,
    /// Attention heads per layer.
    pub num_heads: usize,
    /// Transformer layers.
    pub num_layers: usize,
    /// Maximum sequence length.
    pub seq_len: usize,

    /// Step size of the embedding update.
    pub learning_rate: f64,
    /// Passes over the sample set.
    pub epochs: usize,

    /// Candidates kept by top-k sampling.
    pub top_k: usize,
    /// Top-k sampling temperature (> 0).
    pub temperature: f64,
    /// Prompt used by `infer` when no argument is given.
    pub prompt: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            corpus_path: None,
            vocab_limit: DEFAULT_VOCAB_LIMIT,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            num_heads: DEFAULT_NUM_HEADS,
            num_layers: DEFAULT_NUM_LAYERS,
            seq_len: DEFAULT_SEQ_LEN,
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
            top_k: DEFAULT_TOP_K,
            temperature: DEFAULT_TEMPERATURE,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl RunConfig {
    /// Validates run settings and the model shape they imply.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vocab_limit < 2 {
            return Err(ConfigError::Validation(
                "vocab_limit must be at least 2 (<unk> plus one symbol)".to_string(),
            ));
        }
        self.model_config(self.vocab_limit).validate()?;
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::Validation(
                "learning_rate must be a positive finite number".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Validation(
                "top_k must be greater than 0".to_string(),
            ));
        }
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(ConfigError::Validation(
                "temperature must be a positive finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Model shape for a vocabulary of `vocab_size` entries.
    #[must_use]
    pub fn model_config(&self, vocab_size: usize) -> Config {
        Config {
            vocab_size,
            embedding_dim: self.embedding_dim,
            num_heads: self.num_heads,
            num_layers: self.num_layers,
            seq_len: self.seq_len,
        }
    }
}
