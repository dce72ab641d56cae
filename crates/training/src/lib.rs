//! Bytepair-training - BPE training infrastructure
//!
//! This crate learns byte-pair merge rules from a single text. The text is
//! turned into its UTF-8 bytes and the most frequent adjacent pair is merged
//! into a fresh symbol, over and over, until the target vocabulary size is
//! reached or no pairs are left.
//!
//! # Features
//!
//! - Pair counting with a deterministic tie-break and optional rayon
//!   parallelism
//! - Greedy left-to-right pair replacement
//! - Progress reporting through an injected [`TrainingObserver`]
//!
//! # Example
//!
//! ```rust
//! use bytepair_training::{BpeTrainer, TrainingConfig};
//!
//! let config = TrainingConfig::builder().vocab_size(259).build()?;
//! let trained = BpeTrainer::from_text(config, "aaabdaaabac")?.train_silent()?;
//!
//! assert_eq!(trained.ids(), &[258, 100, 258, 97, 99]);
//! assert_eq!(trained.decoded()?, "aaabdaaabac");
//! # Ok::<(), bytepair_training::BpeError>(())
//! ```

pub use bytepair_core::{BpeError, Result};

// Training infrastructure
pub mod training;
pub use training::{
    merge, merge_in_place, BpeTrainer, LogObserver, MergeStep, NoopObserver, PairCounter,
    PairCounts, RecordingObserver, Termination, TrainedModel, TrainingConfig,
    TrainingConfigBuilder, TrainingObserver, TrainingSummary,
};
