// src/game.rs
// One scratch card play: generate the matrix, score it, and build the
// result document.

use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combination::{self, AppliedCombinations};
use crate::config::GameConfig;
use crate::defs::{CombinationId, SymbolId};
use crate::error::{Result, ScratchError};
use crate::logging::log_info;
use crate::matrix::{Matrix, MatrixGenerator};
use crate::reward;
use crate::tally;

/// Result document of a single play.
///
/// `applied_winning_combinations` and `applied_bonus_symbol` are omitted from
/// the JSON entirely on a zero reward, never written as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub matrix: Matrix,
    pub reward: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_winning_combinations: Option<IndexMap<SymbolId, Vec<CombinationId>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_bonus_symbol: Option<SymbolId>,
}

impl GameOutcome {
    pub fn is_win(&self) -> bool {
        self.reward > 0.0
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct ScratchGame<'a> {
    config: &'a GameConfig,
}

impl<'a> ScratchGame<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Generate a fresh matrix from `rng` and score it
    pub fn play<R: Rng + ?Sized>(&self, bet: f64, rng: &mut R) -> Result<GameOutcome> {
        check_bet(bet)?;
        let matrix = MatrixGenerator::new(self.config).generate(rng)?;
        self.score(matrix, bet)
    }

    /// Score an already generated matrix
    pub fn score(&self, matrix: Matrix, bet: f64) -> Result<GameOutcome> {
        check_bet(bet)?;
        let counts = tally::count_symbols(&matrix, self.config);
        let applied = combination::evaluate(&counts, self.config);
        let base = reward::base_reward(&applied, self.config, bet)?;
        let bonus_id = matrix.bonus_symbol(self.config)?.to_string();
        let final_reward = reward::final_reward(base, &bonus_id, self.config)?;

        log_info(&format!(
            "Bet {bet}: {} winning symbol(s), base reward {base}, bonus {bonus_id}, \
             reward {final_reward}",
            applied.len()
        ));

        if final_reward <= 0.0 {
            return Ok(GameOutcome {
                matrix,
                reward: final_reward,
                applied_winning_combinations: None,
                applied_bonus_symbol: None,
            });
        }

        let bonus_applies = self
            .config
            .symbol(&bonus_id)
            .is_some_and(|bonus| !bonus.impact().is_noop());

        Ok(GameOutcome {
            matrix,
            reward: final_reward,
            applied_winning_combinations: Some(as_output(applied)),
            applied_bonus_symbol: bonus_applies.then_some(bonus_id),
        })
    }
}

fn check_bet(bet: f64) -> Result<()> {
    if bet.is_finite() && bet > 0.0 {
        Ok(())
    } else {
        Err(ScratchError::InvalidBet(bet))
    }
}

fn as_output(applied: AppliedCombinations) -> IndexMap<SymbolId, Vec<CombinationId>> {
    applied
        .into_iter()
        .map(|(symbol, combination)| (symbol, vec![combination]))
        .collect()
}
