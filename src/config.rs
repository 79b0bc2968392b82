// src/config.rs
// Game configuration document: grid size, symbol catalog, probability tables
// and win combinations. Loaded once per run and never mutated afterwards.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::defs::{CombinationId, SymbolId};
use crate::error::{Result, ScratchError};
use crate::logging::{log_info, log_warning};
use crate::weighted::WeightedTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Standard,
    Bonus,
}

/// Effect of a bonus symbol on a non-zero base reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BonusImpact {
    MultiplyReward,
    ExtraBonus,
    Miss,
    Other(String),
}

impl BonusImpact {
    /// True when the impact leaves the reward untouched
    pub fn is_noop(&self) -> bool {
        matches!(self, BonusImpact::Miss | BonusImpact::Other(_))
    }
}

impl From<String> for BonusImpact {
    fn from(value: String) -> Self {
        match value.as_str() {
            "multiply_reward" => BonusImpact::MultiplyReward,
            "extra_bonus" => BonusImpact::ExtraBonus,
            "miss" => BonusImpact::Miss,
            _ => BonusImpact::Other(value),
        }
    }
}

impl From<BonusImpact> for String {
    fn from(value: BonusImpact) -> Self {
        match value {
            BonusImpact::MultiplyReward => "multiply_reward".to_string(),
            BonusImpact::ExtraBonus => "extra_bonus".to_string(),
            BonusImpact::Miss => "miss".to_string(),
            BonusImpact::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub reward_multiplier: f64,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<BonusImpact>,
}

impl Symbol {
    pub fn standard(reward_multiplier: f64) -> Self {
        Symbol { reward_multiplier, kind: SymbolKind::Standard, extra: None, impact: None }
    }

    pub fn bonus(impact: BonusImpact, reward_multiplier: f64, extra: Option<f64>) -> Self {
        Symbol { reward_multiplier, kind: SymbolKind::Bonus, extra, impact: Some(impact) }
    }

    pub fn is_standard(&self) -> bool {
        self.kind == SymbolKind::Standard
    }

    pub fn is_bonus(&self) -> bool {
        self.kind == SymbolKind::Bonus
    }

    /// Flat amount added by an `extra_bonus` symbol, 0 when absent
    pub fn extra(&self) -> f64 {
        self.extra.unwrap_or(0.0)
    }

    /// Impact of a bonus symbol; a missing impact behaves like a miss
    pub fn impact(&self) -> BonusImpact {
        self.impact.clone().unwrap_or(BonusImpact::Miss)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WinTrigger {
    SameSymbols,
    LinearSymbols,
    Other(String),
}

impl From<String> for WinTrigger {
    fn from(value: String) -> Self {
        match value.as_str() {
            "same_symbols" => WinTrigger::SameSymbols,
            "linear_symbols" => WinTrigger::LinearSymbols,
            _ => WinTrigger::Other(value),
        }
    }
}

impl From<WinTrigger> for String {
    fn from(value: WinTrigger) -> Self {
        match value {
            WinTrigger::SameSymbols => "same_symbols".to_string(),
            WinTrigger::LinearSymbols => "linear_symbols".to_string(),
            WinTrigger::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinCombination {
    pub reward_multiplier: f64,
    pub when: WinTrigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_areas: Option<Vec<Vec<String>>>,
}

impl WinCombination {
    pub fn same_symbols(count: u32, reward_multiplier: f64) -> Self {
        WinCombination {
            reward_multiplier,
            when: WinTrigger::SameSymbols,
            count: Some(count),
            group: None,
            covered_areas: None,
        }
    }

    /// Symbol count threshold, 0 when absent
    pub fn count(&self) -> u32 {
        self.count.unwrap_or(0)
    }

    /// Covered areas as (row, column) pairs. Cells are written `"row:column"`.
    pub fn covered_cells(&self) -> Result<Vec<Vec<(usize, usize)>>> {
        let Some(areas) = &self.covered_areas else {
            return Ok(Vec::new());
        };
        areas
            .iter()
            .map(|area| area.iter().map(|cell| parse_cell(cell)).collect())
            .collect()
    }
}

fn parse_cell(cell: &str) -> Result<(usize, usize)> {
    let malformed = || ScratchError::invalid(format!("covered cell `{cell}` is not `row:column`"));
    let (row, column) = cell.split_once(':').ok_or_else(malformed)?;
    match (row.trim().parse::<usize>(), column.trim().parse::<usize>()) {
        (Ok(row), Ok(column)) => Ok((row, column)),
        _ => Err(malformed()),
    }
}

/// Standard symbol weights for one cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellProbability {
    pub row: usize,
    pub column: usize,
    pub symbols: WeightedTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusProbability {
    pub symbols: WeightedTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub standard_symbols: Vec<CellProbability>,
    pub bonus_symbols: BonusProbability,
}

impl Probabilities {
    /// Fallback distribution: the first standard entry, whatever cell it names
    pub fn default_standard(&self) -> Option<&WeightedTable> {
        self.standard_symbols.first().map(|entry| &entry.symbols)
    }

    /// Distribution configured for exactly this cell, if any
    pub fn cell_override(&self, row: usize, column: usize) -> Option<&WeightedTable> {
        self.standard_symbols
            .iter()
            .find(|entry| entry.row == row && entry.column == column)
            .map(|entry| &entry.symbols)
    }

    pub fn bonus(&self) -> &WeightedTable {
        &self.bonus_symbols.symbols
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub symbols: IndexMap<SymbolId, Symbol>,
    pub probabilities: Probabilities,
    pub win_combinations: IndexMap<CombinationId, WinCombination>,
}

impl GameConfig {
    /// Read, parse and validate a configuration document
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScratchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        log_info(&format!(
            "Loaded configuration from {}: {}x{} grid, {} symbols, {} win combinations",
            path.display(),
            config.rows,
            config.columns,
            config.symbols.len(),
            config.win_combinations.len()
        ));
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn symbol(&self, id: &str) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn is_standard(&self, id: &str) -> bool {
        self.symbol(id).is_some_and(Symbol::is_standard)
    }

    pub fn is_bonus(&self, id: &str) -> bool {
        self.symbol(id).is_some_and(Symbol::is_bonus)
    }

    /// Check the invariants the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ScratchError::invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.columns
            )));
        }

        for (id, symbol) in &self.symbols {
            check_amount(&format!("symbol `{id}` reward_multiplier"), symbol.reward_multiplier)?;
            check_amount(&format!("symbol `{id}` extra"), symbol.extra())?;
        }

        if self.probabilities.standard_symbols.is_empty() {
            return Err(ScratchError::invalid("no standard symbol probabilities defined"));
        }
        for entry in &self.probabilities.standard_symbols {
            let context = format!("standard probabilities for cell {}:{}", entry.row, entry.column);
            check_distribution(&context, &entry.symbols)?;
            for symbol in entry.symbols.symbols() {
                if !self.is_standard(symbol) {
                    return Err(ScratchError::invalid(format!(
                        "{context} reference `{symbol}`, which is not a standard symbol"
                    )));
                }
            }
            if entry.row >= self.rows || entry.column >= self.columns {
                log_warning(&format!("{context} lie outside the grid and never match a cell"));
            }
        }

        let bonus = self.probabilities.bonus();
        check_distribution("bonus probabilities", bonus)?;
        for symbol in bonus.symbols() {
            if !self.is_bonus(symbol) {
                return Err(ScratchError::invalid(format!(
                    "bonus probabilities reference `{symbol}`, which is not a bonus symbol"
                )));
            }
        }

        for (id, combination) in &self.win_combinations {
            check_amount(
                &format!("win combination `{id}` reward_multiplier"),
                combination.reward_multiplier,
            )?;
            combination.covered_cells()?;
            match &combination.when {
                WinTrigger::SameSymbols if combination.count() < 1 => {
                    return Err(ScratchError::invalid(format!(
                        "win combination `{id}` needs a count of at least 1"
                    )));
                }
                WinTrigger::SameSymbols => {}
                WinTrigger::LinearSymbols => {
                    log_info(&format!(
                        "Win combination `{id}` uses linear_symbols and is not evaluated"
                    ));
                }
                WinTrigger::Other(when) => {
                    log_warning(&format!(
                        "Win combination `{id}` has unknown trigger `{when}` and is ignored"
                    ));
                }
            }
        }

        Ok(())
    }
}

fn check_amount(context: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScratchError::invalid(format!("{context} must be a non-negative number, got {value}")))
    }
}

fn check_distribution(context: &str, table: &WeightedTable) -> Result<()> {
    if table.is_empty() {
        return Err(ScratchError::invalid(format!("{context} are empty")));
    }
    if table.total() == 0 {
        return Err(ScratchError::invalid(format!("{context} have zero total weight")));
    }
    Ok(())
}
