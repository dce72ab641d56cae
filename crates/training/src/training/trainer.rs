//! BPE trainer implementation.
//!
//! Training runs on a single sequence of byte symbols. Every iteration
//! counts adjacent pairs, picks the most frequent one, mints the next symbol
//! id for it and rewrites the sequence. A trainer is consumed by
//! [`BpeTrainer::train`] (or [`BpeTrainer::finish`]) and turns into a
//! [`TrainedModel`], which can only decode.

use super::config::TrainingConfig;
use super::counter::{PairCounter, PairCounts};
use super::merge::merge_in_place;
use super::observer::{MergeStep, NoopObserver, TrainingObserver, TrainingSummary};
use bytepair_core::{
    symbols_from_bytes, BpeError, BpeModel, MergeTable, Result, Symbol, Vocabulary, BYTE_SYMBOLS,
};

/// How training ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every requested merge was applied
    Completed,
    /// The sequence ran out of adjacent pairs after `merges` merges
    Exhausted { merges: usize },
}

/// BPE trainer, the mutable training state.
#[derive(Debug)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
    /// Pair counter
    counter: PairCounter,
    /// Current symbol sequence
    ids: Vec<Symbol>,
    /// Sequence length before any merge
    original_len: usize,
    /// Merge rules learned so far
    merges: MergeTable,
    /// Set once a count comes back empty
    exhausted: bool,
}

impl BpeTrainer {
    /// Create a trainer over the UTF-8 bytes of `text`.
    pub fn from_text(config: TrainingConfig, text: &str) -> Result<Self> {
        Self::from_bytes(config, text.as_bytes())
    }

    /// Create a trainer over raw bytes.
    pub fn from_bytes(config: TrainingConfig, bytes: &[u8]) -> Result<Self> {
        Self::from_symbols(config, symbols_from_bytes(bytes))
    }

    /// Create a trainer over a sequence of byte symbols.
    ///
    /// Every symbol must be a raw byte (below 256).
    pub fn from_symbols(config: TrainingConfig, ids: Vec<Symbol>) -> Result<Self> {
        config.validate()?;
        if let Some(&id) = ids.iter().find(|&&id| id as usize >= BYTE_SYMBOLS) {
            return Err(BpeError::UnknownSymbol(id));
        }

        Ok(Self {
            counter: PairCounter::new(config.parallel),
            merges: MergeTable::with_capacity(config.num_merges()),
            original_len: ids.len(),
            ids,
            config,
            exhausted: false,
        })
    }

    /// Count the pairs of the current sequence.
    pub fn pair_counts(&self) -> PairCounts {
        self.counter.count(&self.ids)
    }

    /// Run one iteration.
    ///
    /// Returns `None` once the merge budget is spent or no pairs are left.
    pub fn step(&mut self) -> Result<Option<MergeStep>> {
        if self.exhausted || self.merges.len() >= self.config.num_merges() {
            return Ok(None);
        }

        let Some((pair, count)) = self.pair_counts().top() else {
            self.exhausted = true;
            return Ok(None);
        };

        let symbol = self.merges.next_symbol();
        self.merges.push(pair, symbol)?;
        let replaced = merge_in_place(&mut self.ids, pair, symbol);

        Ok(Some(MergeStep {
            rank: self.merges.len() - 1,
            pair,
            count,
            symbol,
            replaced,
            sequence_len: self.ids.len(),
        }))
    }

    /// Run the training loop to the end, reporting to `observer`.
    pub fn train<O: TrainingObserver>(mut self, mut observer: O) -> Result<TrainedModel> {
        let requested = self.config.num_merges();
        observer.on_start(self.ids.len(), requested);

        while let Some(step) = self.step()? {
            observer.on_merge(&step);
        }
        if self.exhausted {
            observer.on_early_stop(self.merges.len(), requested);
        }

        let trained = self.finish();
        observer.on_finish(&trained.summary());
        Ok(trained)
    }

    /// Run the training loop without reporting.
    pub fn train_silent(self) -> Result<TrainedModel> {
        self.train(NoopObserver)
    }

    /// Stop training and freeze the current state.
    pub fn finish(self) -> TrainedModel {
        let termination = if self.exhausted {
            Termination::Exhausted {
                merges: self.merges.len(),
            }
        } else {
            Termination::Completed
        };

        TrainedModel {
            ids: self.ids,
            model: BpeModel::new(self.merges),
            original_len: self.original_len,
            requested: self.config.num_merges(),
            termination,
        }
    }

    /// Current symbol sequence.
    #[inline]
    pub fn ids(&self) -> &[Symbol] {
        &self.ids
    }

    /// Merge rules learned so far.
    #[inline]
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    #[inline]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}

/// Result of training: the final sequence and the frozen model.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    ids: Vec<Symbol>,
    model: BpeModel,
    original_len: usize,
    requested: usize,
    termination: Termination,
}

impl TrainedModel {
    /// Final symbol sequence.
    #[inline]
    pub fn ids(&self) -> &[Symbol] {
        &self.ids
    }

    #[inline]
    pub fn merges(&self) -> &MergeTable {
        self.model.merges()
    }

    #[inline]
    pub fn vocab(&self) -> &Vocabulary {
        self.model.vocab()
    }

    #[inline]
    pub fn model(&self) -> &BpeModel {
        &self.model
    }

    /// Drop the training sequence and keep the decode-only model.
    pub fn into_model(self) -> BpeModel {
        self.model
    }

    /// Sequence length before training.
    #[inline]
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    #[inline]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Original length divided by final length; 1.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.ids.is_empty() {
            1.0
        } else {
            self.original_len as f64 / self.ids.len() as f64
        }
    }

    /// Decode arbitrary symbols with the trained vocabulary.
    pub fn decode(&self, ids: &[Symbol]) -> Result<String> {
        self.model.decode(ids)
    }

    /// Decode the final training sequence.
    pub fn decoded(&self) -> Result<String> {
        self.model.decode(&self.ids)
    }

    pub fn summary(&self) -> TrainingSummary {
        TrainingSummary {
            merges: self.merges().len(),
            requested: self.requested,
            original_len: self.original_len,
            final_len: self.ids.len(),
            compression_ratio: self.compression_ratio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::observer::RecordingObserver;
    use bytepair_core::symbols_from_text;

    fn trainer(text: &str, vocab_size: usize) -> BpeTrainer {
        BpeTrainer::from_text(TrainingConfig::with_vocab_size(vocab_size), text).unwrap()
    }

    #[test]
    fn test_scenario_step_by_step() {
        let mut trainer = trainer("aaabdaaabac", 300);
        assert_eq!(
            trainer.ids(),
            &[97, 97, 97, 98, 100, 97, 97, 97, 98, 97, 99]
        );

        let step = trainer.step().unwrap().unwrap();
        assert_eq!(step.pair, (97, 97));
        assert_eq!(step.count, 4);
        assert_eq!(step.symbol, 256);
        assert_eq!(step.replaced, 2);
        assert_eq!(trainer.ids(), &[256, 97, 98, 100, 256, 97, 98, 97, 99]);
        assert_eq!(trainer.ids().len(), 9);

        // (256, 97) and (97, 98) both occur twice, (256, 97) comes first
        let step = trainer.step().unwrap().unwrap();
        assert_eq!((step.pair, step.count, step.symbol), ((256, 97), 2, 257));
        assert_eq!(trainer.ids(), &[257, 98, 100, 257, 98, 97, 99]);

        let step = trainer.step().unwrap().unwrap();
        assert_eq!((step.pair, step.count, step.symbol), ((257, 98), 2, 258));
        assert_eq!(trainer.ids(), &[258, 100, 258, 97, 99]);

        let step = trainer.step().unwrap().unwrap();
        assert_eq!((step.pair, step.count, step.symbol), ((258, 100), 1, 259));
        assert_eq!(trainer.ids(), &[259, 258, 97, 99]);
    }

    #[test]
    fn test_scenario_runs_out_of_pairs() {
        let mut observer = RecordingObserver::default();
        let trained = trainer("aaabdaaabac", 300).train(&mut observer).unwrap();

        assert_eq!(trained.ids(), &[262]);
        assert_eq!(trained.merges().len(), 7);
        assert_eq!(trained.termination(), Termination::Exhausted { merges: 7 });
        assert_eq!(trained.vocab().get(262), Some(&b"aaabdaaabac"[..]));
        assert_eq!(trained.decoded().unwrap(), "aaabdaaabac");
        assert!((trained.compression_ratio() - 11.0).abs() < f64::EPSILON);

        assert_eq!(observer.started, Some((11, 44)));
        assert_eq!(observer.steps.len(), 7);
        assert_eq!(observer.early_stop, Some((7, 44)));
        let summary = observer.summary.unwrap();
        assert_eq!(summary.merges, 7);
        assert_eq!(summary.final_len, 1);
    }

    #[test]
    fn test_merge_table_order() {
        let trained = trainer("aaabdaaabac", 259).train_silent().unwrap();
        let triples: Vec<_> = trained.merges().triples().collect();
        assert_eq!(triples, vec![(97, 97, 256), (256, 97, 257), (257, 98, 258)]);
        assert_eq!(trained.termination(), Termination::Completed);
        assert_eq!(trained.ids(), &[258, 100, 258, 97, 99]);
        assert_eq!(trained.vocab().get(258), Some(&b"aaab"[..]));
    }

    #[test]
    fn test_vocab_256_is_identity() {
        let text = "Hello, wörld! 你好";
        let trained = trainer(text, 256).train_silent().unwrap();

        assert!(trained.merges().is_empty());
        assert_eq!(trained.ids(), symbols_from_text(text).as_slice());
        assert_eq!(trained.vocab().len(), 256);
        assert_eq!(trained.compression_ratio(), 1.0);
        assert_eq!(trained.termination(), Termination::Completed);
        assert_eq!(trained.decoded().unwrap(), text);
    }

    #[test]
    fn test_vocab_below_256_is_noop() {
        let trained = trainer("abcabc", 100).train_silent().unwrap();
        assert!(trained.merges().is_empty());
        assert_eq!(trained.compression_ratio(), 1.0);
    }

    #[test]
    fn test_round_trip() {
        let texts = [
            "hello world hello world",
            "the quick brown fox jumps over the lazy dog. the dog sleeps.",
            "héllo wörld, ça va? 日本語のテキスト 😀😀😀",
            "a",
            "",
        ];
        for text in texts {
            for vocab_size in [256, 257, 260, 300, 400] {
                let trained = trainer(text, vocab_size).train_silent().unwrap();
                assert_eq!(trained.decoded().unwrap(), text);
                assert_eq!(trained.decode(trained.ids()).unwrap(), text);
                assert!(trained.compression_ratio() >= 1.0);
            }
        }
    }

    #[test]
    fn test_merged_symbols_can_split_utf8() {
        // Decoding a symbol that holds half a character yields U+FFFD
        let trained = trainer("éééé", 257).train_silent().unwrap();
        let first = trained.merges().rules()[0];
        assert_eq!(first.pair, (0xC3, 0xA9));
        assert_eq!(trained.decode(&[0xC3]).unwrap(), "\u{FFFD}");
        assert_eq!(trained.decode(&[first.symbol]).unwrap(), "é");
    }

    #[test]
    fn test_decode_unknown_symbol() {
        let trained = trainer("aaabdaaabac", 258).train_silent().unwrap();
        let err = trained.decode(&[256, 258]).unwrap_err();
        assert!(matches!(err, BpeError::UnknownSymbol(258)));
    }

    #[test]
    fn test_empty_input() {
        let mut observer = RecordingObserver::default();
        let trained = trainer("", 300).train(&mut observer).unwrap();
        assert!(trained.ids().is_empty());
        assert_eq!(trained.termination(), Termination::Exhausted { merges: 0 });
        assert_eq!(trained.compression_ratio(), 1.0);
        assert_eq!(observer.early_stop, Some((0, 44)));
        assert!(observer.steps.is_empty());
    }

    #[test]
    fn test_step_stops_at_budget() {
        let mut trainer = trainer("abababab", 257);
        assert!(trainer.step().unwrap().is_some());
        assert!(trainer.step().unwrap().is_none());
        assert_eq!(trainer.merges().len(), 1);
        assert_eq!(trainer.finish().termination(), Termination::Completed);
    }

    #[test]
    fn test_sequence_never_grows() {
        let mut trainer = trainer("the cat sat on the mat with the hat", 320);
        let mut len = trainer.ids().len();
        while let Some(step) = trainer.step().unwrap() {
            assert!(step.replaced >= 1);
            assert_eq!(step.sequence_len, len - step.replaced);
            len = step.sequence_len;
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let text = "lorem ipsum dolor sit amet ".repeat(2_000);
        let parallel = BpeTrainer::from_text(
            TrainingConfig::builder()
                .vocab_size(300)
                .parallel(true)
                .build()
                .unwrap(),
            &text,
        )
        .unwrap()
        .train_silent()
        .unwrap();
        let sequential = BpeTrainer::from_text(
            TrainingConfig::builder()
                .vocab_size(300)
                .parallel(false)
                .build()
                .unwrap(),
            &text,
        )
        .unwrap()
        .train_silent()
        .unwrap();

        assert_eq!(parallel.ids(), sequential.ids());
        let a: Vec<_> = parallel.merges().triples().collect();
        let b: Vec<_> = sequential.merges().triples().collect();
        assert_eq!(a, b);
        assert_eq!(parallel.decoded().unwrap(), text);
    }

    #[test]
    fn test_trainer_debug_shows_state() {
        let mut trainer = trainer("abab", 257);
        trainer.step().unwrap();
        let shown = format!("{trainer:?}");
        assert!(shown.starts_with("BpeTrainer"));
        assert!(shown.contains("exhausted: false"));
    }

    #[test]
    fn test_rejects_non_byte_input() {
        let err = BpeTrainer::from_symbols(TrainingConfig::default(), vec![1, 2, 256]).unwrap_err();
        assert!(matches!(err, BpeError::UnknownSymbol(256)));
    }
}
