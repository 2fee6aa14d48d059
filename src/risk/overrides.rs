// Post-aggregation score overrides
use serde::{Deserialize, Serialize};

use crate::models::{AppliedOverride, OverrideKind, TokenData};

/// One rung of the critical-flag ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderRule {
    pub min_critical: usize,
    pub penalty: u8,
    pub floor: u8,
}

/// Evaluated top-down; the first rung whose `min_critical` is met wins.
pub const CRITICAL_FLAG_LADDER: [LadderRule; 3] = [
    LadderRule {
        min_critical: 3,
        penalty: 35,
        floor: 75,
    },
    LadderRule {
        min_critical: 2,
        penalty: 25,
        floor: 65,
    },
    LadderRule {
        min_critical: 1,
        penalty: 15,
        floor: 0,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideOutcome {
    pub score: u8,
    pub applied: bool,
    pub reason: Option<String>,
}

impl OverrideOutcome {
    fn unchanged(score: u8) -> Self {
        Self {
            score,
            applied: false,
            reason: None,
        }
    }

    pub fn into_applied(self, kind: OverrideKind, score_before: u8) -> Option<AppliedOverride> {
        if !self.applied {
            return None;
        }
        Some(AppliedOverride {
            kind,
            score_before,
            score_after: self.score,
            reason: self.reason.unwrap_or_default(),
        })
    }
}

/// Raise the base score according to how many critical findings were raised.
///
/// Total over every count; `applied` is true only when the score moved.
pub fn apply_critical_override(base_score: u8, critical_count: usize) -> OverrideOutcome {
    let base = base_score.min(100);
    let Some(rule) = CRITICAL_FLAG_LADDER
        .iter()
        .find(|rule| critical_count >= rule.min_critical)
    else {
        return OverrideOutcome::unchanged(base);
    };

    let raised = (base as u16 + rule.penalty as u16).max(rule.floor as u16).min(100) as u8;
    if raised == base {
        return OverrideOutcome::unchanged(base);
    }

    let reason = if rule.floor > 0 {
        format!(
            "{} critical security flags: score raised by {} with a floor of {} ({} -> {})",
            critical_count, rule.penalty, rule.floor, base, raised
        )
    } else {
        format!(
            "{} critical security flag: score raised by {} ({} -> {})",
            critical_count, rule.penalty, base, raised
        )
    };

    OverrideOutcome {
        score: raised,
        applied: true,
        reason: Some(reason),
    }
}

/// Discount for very large, long-traded assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleTestedConfig {
    pub market_cap_threshold_usd: f64,
    pub discount: f64,
    pub max_score: u8,
}

impl Default for BattleTestedConfig {
    fn default() -> Self {
        Self {
            market_cap_threshold_usd: 50_000_000_000.0,
            discount: 0.5,
            max_score: 25,
        }
    }
}

/// Apply the battle-tested discount. Never raises the score and never runs
/// for a token flagged as an active honeypot.
pub fn apply_battle_tested_override(score: u8, data: &TokenData, config: &BattleTestedConfig) -> OverrideOutcome {
    if data.is_active_honeypot() {
        return OverrideOutcome::unchanged(score);
    }

    let Some(market_cap) = data.market_cap else {
        return OverrideOutcome::unchanged(score);
    };
    if market_cap < config.market_cap_threshold_usd {
        return OverrideOutcome::unchanged(score);
    }

    let discounted = (score as f64 * config.discount).round().clamp(0.0, 100.0) as u8;
    let adjusted = score.min(discounted).min(config.max_score);
    if adjusted == score {
        return OverrideOutcome::unchanged(score);
    }

    OverrideOutcome {
        score: adjusted,
        applied: true,
        reason: Some(format!(
            "Battle-tested asset (market cap ${:.0}B): score discounted from {} to {}",
            market_cap / 1_000_000_000.0,
            score,
            adjusted
        )),
    }
}
