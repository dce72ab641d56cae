//! Console progress for training runs.

use bytepair_training::{LogObserver, MergeStep, TrainingObserver, TrainingSummary};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives a progress bar and forwards every event to a [`LogObserver`].
pub struct ProgressObserver {
    bar: Option<ProgressBar>,
    log: LogObserver,
}

impl ProgressObserver {
    pub fn new(show_bar: bool, log_interval: usize) -> Self {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::hidden();
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner} merges {pos}/{len} [{elapsed_precise}] {msg}",
            ) {
                bar.set_style(style);
            }
            bar
        });
        Self {
            bar,
            log: LogObserver::new(log_interval),
        }
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_start(&mut self, sequence_len: usize, requested: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(requested as u64);
            bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        }
        self.log.on_start(sequence_len, requested);
    }

    fn on_merge(&mut self, step: &MergeStep) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
            bar.set_message(format!("sequence length {}", step.sequence_len));
        }
        self.log.on_merge(step);
    }

    fn on_early_stop(&mut self, completed: usize, requested: usize) {
        self.log.on_early_stop(completed, requested);
    }

    fn on_finish(&mut self, summary: &TrainingSummary) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.log.on_finish(summary);
    }
}
