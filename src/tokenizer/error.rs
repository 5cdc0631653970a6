//! Errors produced when encoding or decoding with a tokenizer.
//!
//! All errors from the tokenizer module use [`TokenizerError`].

use thiserror::Error;

/// Errors produced by the tokenizer module.
///
/// # Variants
///
/// - **UnknownSymbol**: A character was encountered that is not in the vocabulary.
///   *When*: During [`try_encode`](super::Tokenizer::try_encode). The lossy
///   [`encode`](super::Tokenizer::encode) maps such characters to the `<unk>` id instead.
///   *Recovery*: Build the tokenizer from a corpus that includes this symbol, or use `encode`.
///
/// - **InvalidId**: A token id is out of range for the vocabulary.
///   *When*: During [`decode`](super::Tokenizer::decode) when an id is not in `[0, vocab_size)`.
///   *Recovery*: Ensure the ids were produced by this tokenizer or by a model built with its vocab size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// A symbol not in the vocabulary was encountered during encode.
    #[error("tokenizer: unknown symbol {0:?}")]
    UnknownSymbol(String),

    /// A token id is out of range during decode.
    #[error("tokenizer: invalid id {0}")]
    InvalidId(usize),
}
