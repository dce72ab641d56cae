//! Save functionality for trained models.

use super::format::{SerializedModel, MERGES_FILE, VOCAB_FILE};
use bytepair_core::{BpeError, BpeModel, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Model saver - writes a trained model into a directory.
pub struct ModelSaver<'a> {
    model: &'a BpeModel,
}

impl<'a> ModelSaver<'a> {
    /// Create a new model saver.
    pub fn new(model: &'a BpeModel) -> Self {
        Self { model }
    }

    /// Save the merge table to `dir/merges.json`, creating `dir` if needed.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|e| BpeError::io(dir, e))?;

        let file_path = dir.join(MERGES_FILE);
        let file = File::create(&file_path).map_err(|e| BpeError::io(&file_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())
            .map_err(|e| BpeError::Save(format!("Failed to serialize merges: {}", e)))?;
        writer.flush().map_err(|e| BpeError::io(&file_path, e))?;

        log::info!(
            "Saved {} merges to {}",
            self.model.merges().len(),
            file_path.display()
        );
        Ok(())
    }

    /// Write `dir/vocab.txt`, one symbol per line.
    ///
    /// The listing is for humans and is never read back.
    pub fn save_vocab_listing(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|e| BpeError::io(dir, e))?;

        let file_path = dir.join(VOCAB_FILE);
        std::fs::write(&file_path, self.vocab_listing()).map_err(|e| BpeError::io(&file_path, e))
    }

    /// Render the vocabulary listing.
    ///
    /// Byte symbols show their escaped byte; merged symbols also show the
    /// two symbols they were built from.
    pub fn vocab_listing(&self) -> String {
        let merges = self.model.merges();
        let mut out = String::new();
        for (id, piece) in self.model.vocab().iter() {
            let line = match merges.rule_for(id) {
                Some(rule) => format!(
                    "{}\t{}\t{} {}\n",
                    id,
                    escape_piece(piece),
                    rule.pair.0,
                    rule.pair.1
                ),
                None => format!("{}\t{}\n", id, escape_piece(piece)),
            };
            out.push_str(&line);
        }
        out
    }

    fn serialize(&self) -> SerializedModel {
        SerializedModel::from_merges(self.model.merges())
    }
}

/// Escape a byte string so control and non-UTF-8 bytes stay visible.
pub fn escape_piece(piece: &[u8]) -> String {
    piece.escape_ascii().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytepair_core::MergeTable;

    #[test]
    fn test_vocab_listing() {
        let merges = MergeTable::from_triples([(104, 105, 256), (256, 10, 257)]).unwrap();
        let model = BpeModel::new(merges);
        let listing = ModelSaver::new(&model).vocab_listing();
        let lines: Vec<_> = listing.lines().collect();

        assert_eq!(lines.len(), 258);
        assert_eq!(lines[10], "10\t\\n");
        assert_eq!(lines[97], "97\ta");
        assert_eq!(lines[255], "255\t\\xff");
        assert_eq!(lines[256], "256\thi\t104 105");
        assert_eq!(lines[257], "257\thi\\n\t256 10");
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("model");
        let model = BpeModel::default();

        ModelSaver::new(&model).save(&target).unwrap();
        ModelSaver::new(&model).save_vocab_listing(&target).unwrap();

        assert!(target.join(MERGES_FILE).is_file());
        assert!(target.join(VOCAB_FILE).is_file());
    }
}
