//! Vocabulary: mapping between token ids and symbols.

use std::collections::HashMap;

/// Maps token ids to symbols and back. Ids are contiguous from `0` to `len - 1`.
///
/// Symbols are strings so a multi-character marker such as `<unk>` can share the
/// table with single-character symbols.
#[derive(Clone, Debug, Default)]
pub struct Vocab {
    id_to_sym: Vec<String>,
    sym_to_id: HashMap<String, usize>,
}

impl Vocab {
    /// Builds a vocab with the given symbols in order. Duplicates are skipped (first occurrence wins).
    #[must_use]
    pub fn new(symbols: impl IntoIterator<Item = String>) -> Self {
        let mut vocab = Vocab::default();
        for s in symbols {
            vocab.insert(s);
        }
        vocab
    }

    /// Returns the number of symbols (vocab size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_sym.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_sym.is_empty()
    }

    /// Returns the symbol for `id`, or `None` if out of range.
    #[must_use]
    pub fn get_symbol(&self, id: usize) -> Option<&str> {
        self.id_to_sym.get(id).map(String::as_str)
    }

    /// Returns the id for `symbol`, or `None` if not in vocab.
    #[must_use]
    pub fn get_id(&self, symbol: &str) -> Option<usize> {
        self.sym_to_id.get(symbol).copied()
    }

    /// Adds a symbol and returns its id. An existing symbol keeps its id.
    pub fn insert(&mut self, symbol: String) -> usize {
        if let Some(&id) = self.sym_to_id.get(&symbol) {
            return id;
        }
        let id = self.id_to_sym.len();
        self.id_to_sym.push(symbol.clone());
        self.sym_to_id.insert(symbol, id);
        id
    }

    /// Symbols in id order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.id_to_sym.iter().map(String::as_str)
    }
}
