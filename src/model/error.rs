//! Errors produced by the numeric core.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors produced by the model, its blocks, and the sampling utilities.
///
/// # Variants
///
/// - **DimensionMismatch**: two operands of a matrix operation have incompatible shapes.
///   *When*: Only reachable through a construction bug or a caller passing hand-built
///   matrices; the transformer's own wiring never produces it.
///
/// - **SequenceTooLong**: a forward pass received more tokens than `seq_len`.
///   *Recovery*: Truncate the input (e.g. keep the trailing `seq_len` tokens) or reject it.
///
/// - **EmptySequence**: a forward pass or mean pooling received no positions.
///
/// - **TokenOutOfRange**: a token id (or target index) is outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Operation that detected the mismatch.
        op: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("sequence too long: {len} tokens, maximum is {max}")]
    SequenceTooLong { len: usize, max: usize },

    #[error("empty sequence")]
    EmptySequence,

    #[error("token id {token} out of range for vocabulary of {vocab_size}")]
    TokenOutOfRange { token: usize, vocab_size: usize },

    #[error("empty distribution")]
    EmptyDistribution,

    #[error("temperature must be positive and finite, got {0}")]
    InvalidTemperature(f64),

    #[error("invalid model config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("weight initialization: {0}")]
    Init(String),
}
