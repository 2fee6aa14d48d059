// Chain-specific factor weights and weighted aggregation
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ChainType, FactorContribution, FactorKind, FactorScore};
use crate::utils::math::{decimal_to_score, score_to_decimal};

/// Fixed map from factor to weight for one chain family. Weights sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightVector {
    pub chain: ChainType,
    pub weights: BTreeMap<FactorKind, Decimal>,
    pub rationale: &'static str,
}

impl WeightVector {
    fn from_table(chain: ChainType, rationale: &'static str, table: [(FactorKind, i64); 8]) -> Self {
        let weights = table
            .into_iter()
            .map(|(kind, hundredths)| (kind, Decimal::new(hundredths, 2)))
            .collect();
        Self { chain, weights, rationale }
    }

    pub fn weight(&self, kind: FactorKind) -> Decimal {
        self.weights.get(&kind).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.weights.values().copied().sum()
    }
}

/// Weight vector for a chain family. Unknown chains use the EVM vector.
pub fn get_weights(chain: ChainType) -> WeightVector {
    use FactorKind::*;

    match chain {
        ChainType::Evm | ChainType::Other => WeightVector::from_table(
            chain,
            "Balanced across honeypot, tax and proxy/owner risks typical of EVM token contracts",
            [
                (SupplyDilution, 10),
                (HolderConcentration, 15),
                (LiquidityDepth, 15),
                (ContractControl, 20),
                (TaxFee, 15),
                (Activity, 10),
                (BurnDeflation, 5),
                (TokenAge, 10),
            ],
        ),
        ChainType::Solana => WeightVector::from_table(
            chain,
            "Mint and freeze authorities can drain or lock every holder, so contract control dominates",
            [
                (SupplyDilution, 10),
                (HolderConcentration, 15),
                (LiquidityDepth, 15),
                (ContractControl, 30),
                (TaxFee, 5),
                (Activity, 10),
                (BurnDeflation, 5),
                (TokenAge, 10),
            ],
        ),
        ChainType::Cardano => WeightVector::from_table(
            chain,
            "Native assets have no contract owner; the minting policy and supply schedule carry the risk",
            [
                (SupplyDilution, 25),
                (HolderConcentration, 15),
                (LiquidityDepth, 15),
                (ContractControl, 15),
                (TaxFee, 5),
                (Activity, 10),
                (BurnDeflation, 5),
                (TokenAge, 10),
            ],
        ),
    }
}

/// Weighted base score plus the exact per-factor contributions behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateScore {
    pub base_score: u8,
    pub weighted_sum: Decimal,
    pub contributions: Vec<FactorContribution>,
}

/// Dot product of factor scores and weights.
///
/// Scores are rounded to two decimals before weighting so contributions can be
/// reproduced exactly in explanations. Decimal addition keeps the sum
/// independent of factor order.
pub fn aggregate(factor_scores: &[FactorScore], weights: &WeightVector) -> AggregateScore {
    let contributions: Vec<FactorContribution> = factor_scores
        .iter()
        .map(|factor| {
            let score = score_to_decimal(factor.score);
            let weight = weights.weight(factor.name);
            FactorContribution {
                factor: factor.name,
                score,
                weight,
                contribution: score * weight,
            }
        })
        .collect();

    let weighted_sum: Decimal = contributions.iter().map(|c| c.contribution).sum();

    AggregateScore {
        base_score: decimal_to_score(weighted_sum),
        weighted_sum,
        contributions,
    }
}
