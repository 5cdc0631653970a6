//! Tokenization: encode text to token ids and decode back.
//!
//! This module defines the **trait** ([`Tokenizer`]) and **error** ([`TokenizerError`]).
//! Implementations live in the `impls` submodule ([`CharTokenizer`] for character-level).

mod error;
mod impls;
mod vocab;

pub use error::TokenizerError;
pub use impls::{CharTokenizer, UNK_SYMBOL};
pub use vocab::Vocab;

/// Trait for tokenizers: encode text to ids and decode ids to text.
pub trait Tokenizer {
    /// Encodes a string, mapping symbols missing from the vocabulary to [`unk_id`](Tokenizer::unk_id).
    fn encode(&self, s: &str) -> Vec<usize>;

    /// Encodes a string, rejecting symbols missing from the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::UnknownSymbol`] for the first unknown symbol.
    fn try_encode(&self, s: &str) -> Result<Vec<usize>, TokenizerError>;

    /// Decodes a sequence of token ids into a string.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::InvalidId`] if an id is out of range.
    fn decode(&self, ids: &[usize]) -> Result<String, TokenizerError>;

    /// Vocabulary size (number of distinct tokens, `<unk>` included).
    fn vocab_size(&self) -> usize;

    /// Id reserved for unknown symbols.
    fn unk_id(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_reserves_unk_and_skips_whitespace() {
        let t = CharTokenizer::train(["ab a", "ba c"], 100);
        assert_eq!(t.vocab_size(), 4, "<unk> + a, b, c");
        assert_eq!(t.unk_id(), 0);
        assert_eq!(t.decode(&[0]).unwrap(), UNK_SYMBOL);
        assert_eq!(t.vocab().get_id(" "), None);
    }

    #[test]
    fn ids_follow_first_occurrence() {
        let t = CharTokenizer::train(["hello world"], 100);
        let symbols: Vec<&str> = t.vocab().symbols().collect();
        assert_eq!(symbols, ["<unk>", "h", "e", "l", "o", "w", "r", "d"]);
    }

    #[test]
    fn vocab_limit_caps_size() {
        let t = CharTokenizer::train(["abcdef"], 3);
        assert_eq!(t.vocab_size(), 3);
        // 'c' was cut by the limit and encodes as <unk>
        assert_eq!(t.encode("abc"), vec![1, 2, 0]);
    }

    #[test]
    fn encode_decode_drops_spaces() {
        let t = CharTokenizer::train(["hello sphere"], 100);
        let ids = t.encode("hello sphere");
        assert_eq!(ids.len(), 11);
        assert_eq!(t.decode(&ids).unwrap(), "hellosphere");
    }

    #[test]
    fn unknown_char_maps_to_unk_or_errors() {
        let t = CharTokenizer::train(["ab"], 100);
        assert_eq!(t.encode("abz"), vec![1, 2, 0]);
        assert_eq!(
            t.try_encode("abz"),
            Err(TokenizerError::UnknownSymbol("z".to_string()))
        );
        assert_eq!(t.try_encode("ba").unwrap(), vec![2, 1]);
    }

    #[test]
    fn decode_invalid_id_returns_error() {
        let t = CharTokenizer::train(["a"], 100);
        assert_eq!(t.decode(&[1, 100]), Err(TokenizerError::InvalidId(100)));
    }

    #[test]
    fn vocab_insert_duplicate_returns_existing_id() {
        let mut v = Vocab::new(["a".to_string()]);
        let id1 = v.insert("b".to_string());
        let id2 = v.insert("b".to_string());
        assert_eq!(id1, id2);
        assert_eq!(v.len(), 2);
        assert_eq!(v.get_symbol(1), Some("b"));
        assert!(!v.is_empty());
    }
}
