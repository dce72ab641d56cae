//! Progress reporting for the training loop.
//!
//! The trainer never writes to a logger or the console itself. Callers pass
//! an observer and decide where the events go.

use bytepair_core::{Pair, Symbol};

/// One completed merge iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStep {
    /// Zero-based merge index
    pub rank: usize,
    /// The pair that was merged
    pub pair: Pair,
    /// Count of the pair before the merge
    pub count: u64,
    /// Symbol minted for the pair
    pub symbol: Symbol,
    /// Occurrences replaced in the sequence
    pub replaced: usize,
    /// Sequence length after the merge
    pub sequence_len: usize,
}

/// Summary handed to [`TrainingObserver::on_finish`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSummary {
    /// Merges that were applied
    pub merges: usize,
    /// Merges the configuration asked for
    pub requested: usize,
    /// Sequence length before training
    pub original_len: usize,
    /// Sequence length after training
    pub final_len: usize,
    /// `original_len / final_len`
    pub compression_ratio: f64,
}

/// Receives training progress events. Every method defaults to a no-op.
pub trait TrainingObserver {
    /// Called once before the first iteration.
    fn on_start(&mut self, _sequence_len: usize, _requested: usize) {}

    /// Called after every merge.
    fn on_merge(&mut self, _step: &MergeStep) {}

    /// Called when the sequence runs out of pairs before the budget is spent.
    fn on_early_stop(&mut self, _completed: usize, _requested: usize) {}

    /// Called once after the last iteration.
    fn on_finish(&mut self, _summary: &TrainingSummary) {}
}

impl<O: TrainingObserver + ?Sized> TrainingObserver for &mut O {
    fn on_start(&mut self, sequence_len: usize, requested: usize) {
        (**self).on_start(sequence_len, requested)
    }

    fn on_merge(&mut self, step: &MergeStep) {
        (**self).on_merge(step)
    }

    fn on_early_stop(&mut self, completed: usize, requested: usize) {
        (**self).on_early_stop(completed, requested)
    }

    fn on_finish(&mut self, summary: &TrainingSummary) {
        (**self).on_finish(summary)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {}

/// Observer that forwards events to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    /// Emit an `info` line every `interval` merges; 0 disables them
    interval: usize,
}

impl LogObserver {
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(10)
    }
}

impl TrainingObserver for LogObserver {
    fn on_start(&mut self, sequence_len: usize, requested: usize) {
        log::info!(
            "Starting BPE training: {} merges over {} symbols",
            requested,
            sequence_len
        );
    }

    fn on_merge(&mut self, step: &MergeStep) {
        log::debug!(
            "merging pair {:?} (count {}) into a new symbol {}",
            step.pair,
            step.count,
            step.symbol
        );
        if self.interval > 0 && (step.rank + 1) % self.interval == 0 {
            log::info!(
                "{} merges done, sequence length {}",
                step.rank + 1,
                step.sequence_len
            );
        }
    }

    fn on_early_stop(&mut self, completed: usize, requested: usize) {
        log::info!(
            "No adjacent pairs left after {} of {} merges, stopping early",
            completed,
            requested
        );
    }

    fn on_finish(&mut self, summary: &TrainingSummary) {
        log::info!(
            "Finished training: {} merges, {} -> {} symbols ({:.2}x)",
            summary.merges,
            summary.original_len,
            summary.final_len,
            summary.compression_ratio
        );
    }
}

/// Observer that records every merge step, mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub started: Option<(usize, usize)>,
    pub steps: Vec<MergeStep>,
    pub early_stop: Option<(usize, usize)>,
    pub summary: Option<TrainingSummary>,
}

impl TrainingObserver for RecordingObserver {
    fn on_start(&mut self, sequence_len: usize, requested: usize) {
        self.started = Some((sequence_len, requested));
    }

    fn on_merge(&mut self, step: &MergeStep) {
        self.steps.push(*step);
    }

    fn on_early_stop(&mut self, completed: usize, requested: usize) {
        self.early_stop = Some((completed, requested));
    }

    fn on_finish(&mut self, summary: &TrainingSummary) {
        self.summary = Some(*summary);
    }
}
