//! Bytepair-core - Core byte-pair encoding data structures
//!
//! This crate provides the types shared by training and persistence:
//! symbols, the ordered merge table, the byte vocabulary derived from it,
//! and decoding.
//!
//! # Example
//!
//! ```rust
//! use bytepair_core::{BpeModel, MergeTable};
//!
//! let mut merges = MergeTable::new();
//! merges.push((b'h' as u32, b'i' as u32), 256)?;
//!
//! let model = BpeModel::new(merges);
//! assert_eq!(model.decode(&[256, b'!' as u32])?, "hi!");
//! # Ok::<(), bytepair_core::BpeError>(())
//! ```

pub mod error;
pub use error::{BpeError, Result};

pub mod core;
pub use self::core::{
    symbols_from_bytes, symbols_from_text, BpeModel, MergeRule, MergeTable, Pair, Symbol,
    Vocabulary, BYTE_SYMBOLS,
};
