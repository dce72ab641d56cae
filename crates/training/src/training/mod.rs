//! Training infrastructure for BPE vocabularies.
//!
//! This module provides pair counting, the merge primitive and the training
//! loop that learns merge rules from a byte sequence.

pub mod config;
pub mod counter;
pub mod merge;
pub mod observer;
pub mod trainer;

pub use config::{TrainingConfig, TrainingConfigBuilder};
pub use counter::{PairCounter, PairCounts, PairStat, PARALLEL_THRESHOLD};
pub use merge::{merge, merge_in_place};
pub use observer::{
    LogObserver, MergeStep, NoopObserver, RecordingObserver, TrainingObserver, TrainingSummary,
};
pub use trainer::{BpeTrainer, Termination, TrainedModel};
