//! Character-level tokenizer trained from a corpus of documents.

use log::{debug, warn};

use super::super::Vocab;
use super::super::{Tokenizer, TokenizerError};

/// Symbol reserved at id 0 for characters missing from the vocabulary.
pub const UNK_SYMBOL: &str = "<unk>";

/// Character-level tokenizer. Whitespace separates words and is never a token.
///
/// Id 0 is always [`UNK_SYMBOL`]; the remaining ids follow the first occurrence of
/// each character in the training corpus.
#[derive(Clone, Debug)]
pub struct CharTokenizer {
    vocab: Vocab,
}

impl CharTokenizer {
    /// Builds the vocabulary from `corpus`, keeping at most `vocab_limit` entries
    /// (`<unk>` included). Characters seen after the limit is reached are dropped.
    #[must_use]
    pub fn train<I, S>(corpus: I, vocab_limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Vocab::new([UNK_SYMBOL.to_string()]);
        let mut dropped = 0usize;
        for doc in corpus {
            for ch in doc.as_ref().chars().filter(|c| !c.is_whitespace()) {
                let sym = ch.to_string();
                if vocab.get_id(&sym).is_some() {
                    continue;
                }
                if vocab.len() >= vocab_limit {
                    dropped += 1;
                    continue;
                }
                vocab.insert(sym);
            }
        }
        if dropped > 0 {
            warn!("vocab limit {vocab_limit} reached; {dropped} character occurrences map to {UNK_SYMBOL}");
        }
        debug!("char tokenizer: {} symbols", vocab.len());
        CharTokenizer { vocab }
    }

    /// The underlying vocabulary.
    #[must_use]
    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }
}

impl Tokenizer for CharTokenizer {
    fn encode(&self, s: &str) -> Vec<usize> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|ch| {
                self.vocab.get_id(&ch.to_string()).unwrap_or_else(|| {
                    debug!("unknown character {ch:?} encoded as {UNK_SYMBOL}");
                    self.unk_id()
                })
            })
            .collect()
    }

    fn try_encode(&self, s: &str) -> Result<Vec<usize>, TokenizerError> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|ch| {
                let sym = ch.to_string();
                self.vocab
                    .get_id(&sym)
                    .ok_or(TokenizerError::UnknownSymbol(sym))
            })
            .collect()
    }

    fn decode(&self, ids: &[usize]) -> Result<String, TokenizerError> {
        let mut s = String::new();
        for &id in ids {
            let sym = self
                .vocab
                .get_symbol(id)
                .ok_or(TokenizerError::InvalidId(id))?;
            s.push_str(sym);
        }
        Ok(s)
    }

    fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    fn unk_id(&self) -> usize {
        0
    }
}
