//! Serialization and deserialization for trained models.
//!
//! A model directory holds `merges.json`, the ordered merge table, and
//! optionally `vocab.txt`, a listing of every symbol for inspection.

pub mod format;
pub mod load;
pub mod save;

pub use format::{SerializedMerge, SerializedModel, MERGES_FILE, VOCAB_FILE};
pub use load::ModelLoader;
pub use save::{escape_piece, ModelSaver};
