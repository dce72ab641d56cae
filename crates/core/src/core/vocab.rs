//! Vocabulary storage and lookup.
//!
//! The vocabulary maps every symbol to the raw bytes it expands to. Symbols
//! are dense, so the table is a vector indexed by symbol id.

use super::{MergeTable, Symbol, BYTE_SYMBOLS};
use crate::error::{BpeError, Result};

/// Symbol -> byte-string expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Expansion of symbol `i` at index `i`
    pieces: Vec<Vec<u8>>,
}

impl Vocabulary {
    /// Create a vocabulary holding only the 256 raw byte symbols.
    pub fn bytes() -> Self {
        Self::seeded(BYTE_SYMBOLS)
    }

    /// Byte symbols only, with room reserved for `capacity` symbols in total.
    fn seeded(capacity: usize) -> Self {
        let mut pieces = Vec::with_capacity(capacity.max(BYTE_SYMBOLS));
        pieces.extend((0..=u8::MAX).map(|b| vec![b]));
        Self { pieces }
    }

    /// Build the vocabulary by replaying a merge table in order.
    pub fn from_merges(merges: &MergeTable) -> Self {
        let mut vocab = Self::seeded(BYTE_SYMBOLS + merges.len());
        for rule in merges {
            // MergeTable guarantees both operands are below the new symbol,
            // which is exactly the next index here.
            let mut piece = vocab.pieces[rule.pair.0 as usize].clone();
            piece.extend_from_slice(&vocab.pieces[rule.pair.1 as usize]);
            vocab.pieces.push(piece);
        }
        vocab
    }

    /// Get the expansion of a symbol.
    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<&[u8]> {
        self.pieces.get(symbol as usize).map(Vec::as_slice)
    }

    /// Concatenate the expansions of `ids`.
    ///
    /// Fails on the first symbol that has no entry.
    pub fn decode_bytes(&self, ids: &[Symbol]) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(ids.len());
        for &id in ids {
            let piece = self.get(id).ok_or(BpeError::UnknownSymbol(id))?;
            bytes.extend_from_slice(piece);
        }
        Ok(bytes)
    }

    /// Decode `ids` to text, replacing invalid UTF-8 with U+FFFD.
    pub fn decode(&self, ids: &[Symbol]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Iterate over `(symbol, expansion)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[u8])> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(id, piece)| (id as Symbol, piece.as_slice()))
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Always false: the byte symbols are always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::bytes()
    }
}
