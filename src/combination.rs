// src/combination.rs
// Matching symbol counts against the same_symbols win combinations.

use indexmap::IndexMap;

use crate::config::{GameConfig, WinTrigger};
use crate::defs::{CombinationId, SymbolId};
use crate::tally::SymbolCounts;

/// Symbol -> the single best win combination it triggered
pub type AppliedCombinations = IndexMap<SymbolId, CombinationId>;

/// Pick one win combination per symbol with a non-zero count.
/// Symbols that trigger nothing are left out.
pub fn evaluate(counts: &SymbolCounts, config: &GameConfig) -> AppliedCombinations {
    counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .filter_map(|(symbol, &count)| {
            best_same_symbols(count, config).map(|rule| (symbol.clone(), rule.to_string()))
        })
        .collect()
}

/// The same_symbols combination with the highest threshold not above `count`.
///
/// Thresholds are expected to be distinct. When two rules share one, the
/// comparison is strict, so the one defined first in the document wins.
/// linear_symbols rules and group stacking are not evaluated.
pub fn best_same_symbols(count: u32, config: &GameConfig) -> Option<&str> {
    let mut best: Option<(&str, u32)> = None;
    for (id, combination) in &config.win_combinations {
        if combination.when != WinTrigger::SameSymbols {
            continue;
        }
        let threshold = combination.count();
        if threshold == 0 || threshold > count {
            continue;
        }
        if best.is_none_or(|(_, current)| threshold > current) {
            best = Some((id.as_str(), threshold));
        }
    }
    best.map(|(id, _)| id)
}
