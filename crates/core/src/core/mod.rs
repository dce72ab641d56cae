//! Core byte-pair encoding data structures.
//!
//! Symbols `0..256` stand for raw bytes; every merge mints the next id
//! above the highest one in use.

pub mod merges;
pub mod model;
pub mod vocab;

pub use merges::{MergeRule, MergeTable};
pub use model::BpeModel;
pub use vocab::Vocabulary;

/// A symbol id: a raw byte (`0..256`) or a merged unit (`256..`).
pub type Symbol = u32;

/// An ordered pair of adjacent symbols, left then right.
pub type Pair = (Symbol, Symbol);

/// Number of symbols reserved for raw byte values.
pub const BYTE_SYMBOLS: usize = 256;

/// Convert text into its byte sequence, one symbol per UTF-8 byte.
pub fn symbols_from_text(text: &str) -> Vec<Symbol> {
    symbols_from_bytes(text.as_bytes())
}

/// Convert raw bytes into a symbol sequence.
pub fn symbols_from_bytes(bytes: &[u8]) -> Vec<Symbol> {
    bytes.iter().map(|&b| Symbol::from(b)).collect()
}
