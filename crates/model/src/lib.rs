//! Bytepair-model - persistence for trained BPE models
//!
//! A trained model is fully described by its merge table. This crate writes
//! the table as an ordered list of `(left, right, new)` triples and rebuilds
//! the vocabulary on load by replaying them.
//!
//! # Example
//!
//! ```rust,no_run
//! use bytepair_model::{ModelLoader, ModelSaver};
//! use bytepair_training::{BpeTrainer, TrainingConfig};
//! use std::path::Path;
//!
//! let trained = BpeTrainer::from_text(TrainingConfig::default(), "hello hello")?
//!     .train_silent()?;
//! ModelSaver::new(trained.model()).save(Path::new("model"))?;
//!
//! let model = ModelLoader::load(Path::new("model"))?;
//! assert_eq!(model.decode(trained.ids())?, "hello hello");
//! # Ok::<(), bytepair_model::BpeError>(())
//! ```

pub use bytepair_core::{BpeError, BpeModel, Result};

// IO/Serialization
pub mod io;
pub use io::{ModelLoader, ModelSaver, SerializedModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
