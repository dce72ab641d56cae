//! Pair counting for BPE training.
//!
//! Counts are recomputed from the current sequence on every iteration.
//! Alongside each count the counter keeps the position where the pair first
//! occurs, which gives equal-count pairs a fixed order: the one a left to
//! right scan meets first ranks higher.

use ahash::AHashMap;
use bytepair_core::{Pair, Symbol};
use std::cmp::Ordering;

/// Below this many symbols the parallel counter falls back to a single pass.
pub const PARALLEL_THRESHOLD: usize = 1 << 15;

/// Count and first position of one adjacent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairStat {
    /// Number of adjacent occurrences
    pub count: u64,
    /// Index of the left symbol of the first occurrence
    pub first: usize,
}

impl PairStat {
    #[inline]
    fn absorb(&mut self, other: PairStat) {
        self.count += other.count;
        self.first = self.first.min(other.first);
    }

    /// Higher count first, then earlier first occurrence.
    #[inline]
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.first.cmp(&other.first))
    }
}

/// Adjacent pair counts over one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCounts {
    stats: AHashMap<Pair, PairStat>,
}

impl PairCounts {
    /// Get the count of a pair, if it occurs.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<u64> {
        self.stats.get(&pair).map(|s| s.count)
    }

    /// Get the count and first position of a pair.
    #[inline]
    pub fn stat(&self, pair: Pair) -> Option<PairStat> {
        self.stats.get(&pair).copied()
    }

    /// Number of distinct pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Sum of all counts; `n - 1` for a sequence of `n >= 1` symbols.
    pub fn total(&self) -> u64 {
        self.stats.values().map(|s| s.count).sum()
    }

    /// The most frequent pair and its count.
    ///
    /// Ties go to the pair that occurs first in the sequence.
    pub fn top(&self) -> Option<(Pair, u64)> {
        self.stats
            .iter()
            .min_by(|a, b| a.1.rank_cmp(b.1))
            .map(|(&pair, stat)| (pair, stat.count))
    }

    /// All pairs, best first, in the same order [`PairCounts::top`] uses.
    pub fn ranked(&self) -> Vec<(Pair, u64)> {
        let mut entries: Vec<_> = self.stats.iter().collect();
        entries.sort_unstable_by(|a, b| a.1.rank_cmp(b.1));
        entries
            .into_iter()
            .map(|(&pair, stat)| (pair, stat.count))
            .collect()
    }

    /// Iterate over `(pair, count)` in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, u64)> + '_ {
        self.stats.iter().map(|(&pair, stat)| (pair, stat.count))
    }

    #[inline]
    fn record(&mut self, pair: Pair, pos: usize) {
        self.stats
            .entry(pair)
            .and_modify(|s| s.count += 1)
            .or_insert(PairStat {
                count: 1,
                first: pos,
            });
    }

    fn absorb(self, other: PairCounts) -> PairCounts {
        // Fold the smaller map into the larger one
        let (mut into, from) = if self.stats.len() >= other.stats.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (pair, stat) in from.stats {
            into.stats
                .entry(pair)
                .and_modify(|s| s.absorb(stat))
                .or_insert(stat);
        }
        into
    }
}

/// Counter for adjacent symbol pairs.
#[derive(Debug, Clone, Copy)]
pub struct PairCounter {
    /// Whether large sequences are counted with rayon
    parallel: bool,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// A counter that always runs on the calling thread.
    pub fn sequential() -> Self {
        Self::new(false)
    }

    /// Count every adjacent pair in `ids`.
    pub fn count(&self, ids: &[Symbol]) -> PairCounts {
        if self.parallel && ids.len() >= PARALLEL_THRESHOLD {
            Self::count_pairs_parallel(ids)
        } else {
            Self::count_pairs_sequential(ids)
        }
    }

    /// Count all pairs sequentially.
    pub fn count_pairs_sequential(ids: &[Symbol]) -> PairCounts {
        let mut counts = PairCounts::default();
        for (pos, window) in ids.windows(2).enumerate() {
            counts.record((window[0], window[1]), pos);
        }
        counts
    }

    /// Count all pairs in parallel.
    ///
    /// Produces exactly what [`PairCounter::count_pairs_sequential`] does:
    /// counts are summed and first positions take the minimum, both of which
    /// are order independent.
    pub fn count_pairs_parallel(ids: &[Symbol]) -> PairCounts {
        use rayon::prelude::*;

        ids.par_windows(2)
            .enumerate()
            .fold(PairCounts::default, |mut counts, (pos, window)| {
                counts.record((window[0], window[1]), pos);
                counts
            })
            .reduce(PairCounts::default, PairCounts::absorb)
    }
}

impl Default for PairCounter {
    fn default() -> Self {
        Self::new(true)
    }
}
