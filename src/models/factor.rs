use serde::{Deserialize, Serialize};
use std::fmt;

/// Independently scored risk dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    SupplyDilution,
    HolderConcentration,
    LiquidityDepth,
    ContractControl,
    TaxFee,
    Activity,
    BurnDeflation,
    TokenAge,
}

impl FactorKind {
    pub const ALL: [FactorKind; 8] = [
        FactorKind::SupplyDilution,
        FactorKind::HolderConcentration,
        FactorKind::LiquidityDepth,
        FactorKind::ContractControl,
        FactorKind::TaxFee,
        FactorKind::Activity,
        FactorKind::BurnDeflation,
        FactorKind::TokenAge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::SupplyDilution => "supply_dilution",
            FactorKind::HolderConcentration => "holder_concentration",
            FactorKind::LiquidityDepth => "liquidity_depth",
            FactorKind::ContractControl => "contract_control",
            FactorKind::TaxFee => "tax_fee",
            FactorKind::Activity => "activity",
            FactorKind::BurnDeflation => "burn_deflation",
            FactorKind::TokenAge => "token_age",
        }
    }

    /// Human-readable label for explanations.
    pub fn label(&self) -> &'static str {
        match self {
            FactorKind::SupplyDilution => "Supply dilution",
            FactorKind::HolderConcentration => "Holder concentration",
            FactorKind::LiquidityDepth => "Liquidity depth",
            FactorKind::ContractControl => "Contract control",
            FactorKind::TaxFee => "Buy/sell tax",
            FactorKind::Activity => "Trading activity",
            FactorKind::BurnDeflation => "Burn / deflation",
            FactorKind::TokenAge => "Token age",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much real input backed a factor score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FactorQuality {
    Full,
    Partial,
    Estimated,
    Missing,
}

impl FactorQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorQuality::Full => "FULL",
            FactorQuality::Partial => "PARTIAL",
            FactorQuality::Estimated => "ESTIMATED",
            FactorQuality::Missing => "MISSING",
        }
    }

    /// Contribution of one factor to the confidence baseline.
    pub fn confidence_weight(&self) -> f64 {
        match self {
            FactorQuality::Full => 1.0,
            FactorQuality::Partial => 0.5,
            FactorQuality::Estimated => 0.25,
            FactorQuality::Missing => 0.0,
        }
    }

    /// True when the score came from the engine's defaults rather than provider data.
    pub fn is_engine_estimate(&self) -> bool {
        matches!(self, FactorQuality::Estimated | FactorQuality::Missing)
    }
}

/// One factor's risk sub-score (0 = safest, 100 = riskiest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: FactorKind,
    pub score: f64,
    pub quality: FactorQuality,
    pub rationale: String,
}

impl FactorScore {
    pub fn new(name: FactorKind, score: f64, quality: FactorQuality, rationale: impl Into<String>) -> Self {
        Self {
            name,
            score: if score.is_finite() { score.clamp(0.0, 100.0) } else { NEUTRAL_FACTOR_SCORE },
            quality,
            rationale: rationale.into(),
        }
    }

    /// Neutral placeholder used when none of the factor's inputs are known.
    pub fn missing(name: FactorKind, rationale: impl Into<String>) -> Self {
        Self::new(name, NEUTRAL_FACTOR_SCORE, FactorQuality::Missing, rationale)
    }
}

/// Score reported by a factor with no usable input.
pub const NEUTRAL_FACTOR_SCORE: f64 = 50.0;
