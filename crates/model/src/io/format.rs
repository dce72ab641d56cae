//! On-disk format for trained models.
//!
//! A model is stored as its merge table only. The vocabulary is rebuilt on
//! load by replaying the merges, so their order is part of the format.

use bytepair_core::{MergeTable, Symbol};
use serde::{Deserialize, Serialize};

/// File name of the merge table inside a model directory.
pub const MERGES_FILE: &str = "merges.json";

/// File name of the human-readable vocabulary listing.
pub const VOCAB_FILE: &str = "vocab.txt";

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// A merge as `(left, right, new)`.
pub type SerializedMerge = (Symbol, Symbol, Symbol);

/// Complete model serialization format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Format version
    pub format: u32,
    /// Version of the crate that wrote the file
    pub version: String,
    /// Number of symbols the model decodes
    pub vocab_size: usize,
    /// Merge rules in creation order
    pub merges: Vec<SerializedMerge>,
}

impl SerializedModel {
    /// Capture a merge table.
    pub fn from_merges(merges: &MergeTable) -> Self {
        Self {
            format: FORMAT_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            vocab_size: bytepair_core::BYTE_SYMBOLS + merges.len(),
            merges: merges.triples().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_serialize_as_ordered_triples() {
        let merges = MergeTable::from_triples([(97, 97, 256), (256, 97, 257)]).unwrap();
        let data = SerializedModel::from_merges(&merges);
        assert_eq!(data.vocab_size, 258);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["merges"], serde_json::json!([[97, 97, 256], [256, 97, 257]]));
        assert_eq!(json["format"], 1);

        let back: SerializedModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
