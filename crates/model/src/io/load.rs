//! Load functionality for saved models.

use super::format::{SerializedModel, FORMAT_VERSION, MERGES_FILE};
use bytepair_core::{BpeError, BpeModel, MergeTable, Result, BYTE_SYMBOLS};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Model loader - reads models written by [`super::ModelSaver`].
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model from `dir/merges.json`.
    pub fn load(dir: &Path) -> Result<BpeModel> {
        let file_path = dir.join(MERGES_FILE);
        let file = File::open(&file_path).map_err(|e| BpeError::io(&file_path, e))?;

        let serialized: SerializedModel = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| BpeError::Load(format!("Failed to deserialize merges: {}", e)))?;

        let model = Self::deserialize(serialized)?;
        log::debug!(
            "Loaded {} merges from {}",
            model.merges().len(),
            file_path.display()
        );
        Ok(model)
    }

    /// Rebuild a model by replaying the serialized merges in order.
    pub fn deserialize(data: SerializedModel) -> Result<BpeModel> {
        if data.format != FORMAT_VERSION {
            return Err(BpeError::Load(format!(
                "Unsupported format version {} (expected {})",
                data.format, FORMAT_VERSION
            )));
        }

        let merges = MergeTable::from_triples(data.merges)?;
        let vocab_size = BYTE_SYMBOLS + merges.len();
        if data.vocab_size != vocab_size {
            return Err(BpeError::Load(format!(
                "vocab_size is {} but the merges define {} symbols",
                data.vocab_size, vocab_size
            )));
        }

        Ok(BpeModel::new(merges))
    }
}
