// src/tally.rs
// Occurrence counts of standard symbols in a generated matrix.

use indexmap::IndexMap;

use crate::config::GameConfig;
use crate::defs::SymbolId;
use crate::matrix::Matrix;

/// Standard symbol -> occurrences, in order of first appearance (row-major)
pub type SymbolCounts = IndexMap<SymbolId, u32>;

/// Count standard-type cells. Bonus cells and ids missing from the catalog
/// are skipped.
pub fn count_symbols(matrix: &Matrix, config: &GameConfig) -> SymbolCounts {
    let mut counts = SymbolCounts::new();
    for symbol in matrix.cells().filter(|symbol| config.is_standard(symbol)) {
        *counts.entry(symbol.to_string()).or_insert(0) += 1;
    }
    counts
}
