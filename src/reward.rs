// src/reward.rs
// Base reward from the applied combinations, then the bonus symbol on top.

use crate::combination::AppliedCombinations;
use crate::config::{BonusImpact, GameConfig};
use crate::error::{Result, ScratchError};

/// Sum of bet * symbol multiplier * combination multiplier over every
/// applied combination. 0 when nothing was applied.
pub fn base_reward(applied: &AppliedCombinations, config: &GameConfig, bet: f64) -> Result<f64> {
    let mut total = 0.0;
    for (symbol_id, combination_id) in applied {
        let symbol = config
            .symbol(symbol_id)
            .ok_or_else(|| ScratchError::UnknownSymbol(symbol_id.clone()))?;
        let combination = config
            .win_combinations
            .get(combination_id)
            .ok_or_else(|| ScratchError::UnknownCombination(combination_id.clone()))?;
        total += bet * symbol.reward_multiplier * combination.reward_multiplier;
    }
    Ok(total)
}

/// Apply the bonus symbol's impact. A zero base reward stays zero.
pub fn final_reward(base: f64, bonus_id: &str, config: &GameConfig) -> Result<f64> {
    if base == 0.0 {
        return Ok(0.0);
    }
    let bonus = config
        .symbol(bonus_id)
        .ok_or_else(|| ScratchError::UnknownSymbol(bonus_id.to_string()))?;
    let reward = match bonus.impact() {
        BonusImpact::MultiplyReward => base * bonus.reward_multiplier,
        BonusImpact::ExtraBonus => base + bonus.extra(),
        BonusImpact::Miss | BonusImpact::Other(_) => base,
    };
    Ok(reward)
}
