//! Pair replacement over a symbol sequence.
//!
//! Occurrences are matched greedily from the left: once two positions are
//! consumed by a match the scan resumes after them, so `A A A` with pair
//! `(A, A)` becomes `X A`.

use bytepair_core::{Pair, Symbol};

/// Replace every non-overlapping occurrence of `pair` in `ids` with `symbol`.
///
/// A pair that does not occur leaves the sequence unchanged.
pub fn merge(ids: &[Symbol], pair: Pair, symbol: Symbol) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(ids.len());
    let mut i = 0;
    while i < ids.len() {
        if i + 1 < ids.len() && ids[i] == pair.0 && ids[i + 1] == pair.1 {
            out.push(symbol);
            i += 2;
        } else {
            out.push(ids[i]);
            i += 1;
        }
    }
    out
}

/// In-place form of [`merge`].
///
/// Returns the number of occurrences replaced; the sequence shrinks by
/// exactly that many symbols.
pub fn merge_in_place(ids: &mut Vec<Symbol>, pair: Pair, symbol: Symbol) -> usize {
    let len = ids.len();
    let mut read = 0;
    let mut write = 0;
    while read < len {
        if read + 1 < len && ids[read] == pair.0 && ids[read + 1] == pair.1 {
            ids[write] = symbol;
            read += 2;
        } else {
            ids[write] = ids[read];
            read += 1;
        }
        write += 1;
    }
    ids.truncate(write);
    len - write
}
