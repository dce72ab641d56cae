//! Decode-only view of a trained model.

use super::{MergeTable, Symbol, Vocabulary};
use crate::error::Result;

/// A merge table together with the vocabulary derived from it.
///
/// Neither part changes after construction.
#[derive(Debug, Clone)]
pub struct BpeModel {
    merges: MergeTable,
    vocab: Vocabulary,
}

impl BpeModel {
    /// Build a model, deriving the vocabulary from `merges`.
    pub fn new(merges: MergeTable) -> Self {
        let vocab = Vocabulary::from_merges(&merges);
        Self { merges, vocab }
    }

    /// Decode symbols into text, replacing invalid UTF-8 with U+FFFD.
    #[inline]
    pub fn decode(&self, ids: &[Symbol]) -> Result<String> {
        self.vocab.decode(ids)
    }

    /// Decode symbols into raw bytes.
    #[inline]
    pub fn decode_bytes(&self, ids: &[Symbol]) -> Result<Vec<u8>> {
        self.vocab.decode_bytes(ids)
    }

    #[inline]
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    #[inline]
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Number of symbols the model can decode.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }
}

impl Default for BpeModel {
    fn default() -> Self {
        Self::new(MergeTable::new())
    }
}
