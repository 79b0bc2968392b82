// src/weighted.rs
// Ordered weighted distribution over symbol ids and selection-by-weight.

use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::defs::{SymbolId, Weight};

/// Symbol weights in document order. The order is part of the contract:
/// the same random draw always maps to the same symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedTable(IndexMap<SymbolId, Weight>);

impl WeightedTable {
    pub fn new() -> Self {
        WeightedTable(IndexMap::new())
    }

    pub fn with(mut self, symbol: &str, weight: Weight) -> Self {
        self.0.insert(symbol.to_string(), weight);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|&w| u64::from(w)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Weight)> {
        self.0.iter().map(|(symbol, &weight)| (symbol.as_str(), weight))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Draw one symbol with probability weight / total.
    ///
    /// Consumes exactly one value from `rng`: an integer uniform in
    /// `[0, total)`. The first entry whose cumulative weight exceeds it wins.
    /// Returns `None` only for a table with zero total weight.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let draw = rng.random_range(0..total);
        self.pick(draw)
    }

    fn pick(&self, draw: u64) -> Option<&str> {
        let mut cumulative = 0u64;
        for (symbol, weight) in self.iter() {
            cumulative += u64::from(weight);
            if draw < cumulative {
                return Some(symbol);
            }
        }
        None
    }
}

impl FromIterator<(SymbolId, Weight)> for WeightedTable {
    fn from_iter<I: IntoIterator<Item = (SymbolId, Weight)>>(iter: I) -> Self {
        WeightedTable(iter.into_iter().collect())
    }
}
