//! Merge table management for BPE.
//!
//! The merge table records every learned merge in the order it was created.
//! That order matters: a later rule may reference a symbol minted by an
//! earlier one, and the vocabulary is rebuilt by replaying the rules front
//! to back.

use super::{Pair, Symbol, BYTE_SYMBOLS};
use crate::error::{BpeError, Result};
use ahash::AHashMap;

/// A single learned merge: `pair` was replaced by `symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRule {
    /// The adjacent pair that was merged
    pub pair: Pair,
    /// The symbol minted for the pair
    pub symbol: Symbol,
}

impl MergeRule {
    /// Create a merge rule.
    pub fn new(pair: Pair, symbol: Symbol) -> Self {
        Self { pair, symbol }
    }

    /// The rule as a `(left, right, new)` triple.
    #[inline]
    pub fn as_triple(&self) -> (Symbol, Symbol, Symbol) {
        (self.pair.0, self.pair.1, self.symbol)
    }
}

/// Ordered collection of merge rules with pair lookup.
///
/// Invariants kept by [`MergeTable::push`]:
/// - the n-th rule mints symbol `256 + n`
/// - both operands of a rule are below the symbol it mints
/// - no pair appears twice
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    /// Rules in creation order
    rules: Vec<MergeRule>,
    /// Pair -> minted symbol
    index: AHashMap<Pair, Symbol>,
}

impl MergeTable {
    /// Create an empty merge table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty merge table with room for `capacity` rules.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Rebuild a table from `(left, right, new)` triples, in order.
    ///
    /// Every triple goes through [`MergeTable::push`], so a list that is out
    /// of order or references unknown symbols is rejected.
    pub fn from_triples(triples: impl IntoIterator<Item = (Symbol, Symbol, Symbol)>) -> Result<Self> {
        let mut table = Self::new();
        for (left, right, symbol) in triples {
            table.push((left, right), symbol)?;
        }
        Ok(table)
    }

    /// The symbol the next merge must mint.
    #[inline]
    pub fn next_symbol(&self) -> Symbol {
        (BYTE_SYMBOLS + self.rules.len()) as Symbol
    }

    /// Append a merge rule.
    pub fn push(&mut self, pair: Pair, symbol: Symbol) -> Result<()> {
        let expected = self.next_symbol();
        if symbol != expected {
            return Err(BpeError::InvalidMerge(format!(
                "pair {pair:?} mints symbol {symbol}, expected {expected}"
            )));
        }
        if pair.0 >= symbol || pair.1 >= symbol {
            return Err(BpeError::InvalidMerge(format!(
                "pair {pair:?} references a symbol not below {symbol}"
            )));
        }
        if let Some(&existing) = self.index.get(&pair) {
            return Err(BpeError::InvalidMerge(format!(
                "pair {pair:?} was already merged into {existing}"
            )));
        }

        self.index.insert(pair, symbol);
        self.rules.push(MergeRule::new(pair, symbol));
        Ok(())
    }

    /// Get the symbol a pair was merged into.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<Symbol> {
        self.index.get(&pair).copied()
    }

    /// Rule that minted `symbol`, if it is a merged symbol of this table.
    pub fn rule_for(&self, symbol: Symbol) -> Option<&MergeRule> {
        (symbol as usize)
            .checked_sub(BYTE_SYMBOLS)
            .and_then(|rank| self.rules.get(rank))
    }

    /// Rules in creation order.
    #[inline]
    pub fn rules(&self) -> &[MergeRule] {
        &self.rules
    }

    /// Iterate over the rules in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// Iterate over the rules as `(left, right, new)` triples.
    pub fn triples(&self) -> impl Iterator<Item = (Symbol, Symbol, Symbol)> + '_ {
        self.rules.iter().map(MergeRule::as_triple)
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a MergeTable {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut table = MergeTable::new();
        table.push((97, 97), 256).unwrap();
        table.push((256, 97), 257).unwrap();

        assert_eq!(table.get((97, 97)), Some(256));
        assert_eq!(table.get((256, 97)), Some(257));
        assert_eq!(table.get((97, 98)), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.next_symbol(), 258);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let table = MergeTable::from_triples([(104, 105, 256), (32, 256, 257), (1, 2, 258)]).unwrap();
        let triples: Vec<_> = table.triples().collect();
        assert_eq!(triples, vec![(104, 105, 256), (32, 256, 257), (1, 2, 258)]);
    }

    #[test]
    fn test_rejects_duplicate_pair() {
        let mut table = MergeTable::new();
        table.push((1, 2), 256).unwrap();
        let err = table.push((1, 2), 257).unwrap_err();
        assert!(matches!(err, BpeError::InvalidMerge(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rejects_non_consecutive_symbol() {
        let mut table = MergeTable::new();
        assert!(table.push((1, 2), 300).is_err());
        assert!(table.push((1, 2), 255).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_rejects_forward_reference() {
        let mut table = MergeTable::new();
        // 256 is the symbol being minted, so it cannot be an operand
        assert!(table.push((256, 1), 256).is_err());
        assert!(MergeTable::from_triples([(1, 2, 256), (257, 3, 257)]).is_err());
    }

    #[test]
    fn test_rule_for() {
        let table = MergeTable::from_triples([(1, 2, 256), (256, 3, 257)]).unwrap();
        assert_eq!(table.rule_for(257), Some(&MergeRule::new((256, 3), 257)));
        assert_eq!(table.rule_for(97), None);
        assert_eq!(table.rule_for(258), None);
    }
}
