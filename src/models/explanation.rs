use serde::{Deserialize, Serialize};

use crate::models::{ChainType, FactorContribution, RiskLevel, RiskResult, TokenData};

/// Token identity and headline market figures used by explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSummary {
    pub address: String,
    pub chain: ChainType,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub market_cap: Option<f64>,
    pub liquidity_usd: Option<f64>,
    pub holder_count: Option<u64>,
    pub age_days: Option<f64>,
}

impl TokenSummary {
    pub fn display_name(&self) -> String {
        match (&self.symbol, &self.name) {
            (Some(symbol), Some(name)) => format!("{} ({})", name, symbol),
            (Some(symbol), None) => symbol.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => self.address.clone(),
        }
    }
}

impl From<&TokenData> for TokenSummary {
    fn from(data: &TokenData) -> Self {
        Self {
            address: data.address.clone(),
            chain: data.chain,
            symbol: data.symbol.clone(),
            name: data.name.clone(),
            market_cap: data.market_cap,
            liquidity_usd: data.liquidity_usd,
            holder_count: data.holder_count,
            age_days: data.age_days,
        }
    }
}

/// Natural-language explanation of a risk result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskExplanation {
    pub overview: String,
    pub key_insights: Vec<String>,
    pub risk_analysis: String,
    pub recommendation: String,
    pub technical_details: String,
    pub calculation_breakdown: String,
}

/// Payload sent to a generative explainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationRequest {
    pub token: TokenSummary,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub base_score: u8,
    pub confidence_score: u8,
    pub contributions: Vec<FactorContribution>,
    pub red_flags: Vec<String>,
    pub positive_signals: Vec<String>,
}

impl ExplanationRequest {
    pub fn from_result(token: TokenSummary, result: &RiskResult) -> Self {
        Self {
            token,
            risk_score: result.overall_risk_score,
            risk_level: result.risk_level,
            base_score: result.base_score,
            confidence_score: result.confidence_score,
            contributions: result.contributions.clone(),
            red_flags: result.red_flags(),
            positive_signals: result.positive_signals.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExplanationSource {
    Generative,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationOutcome {
    pub explanation: RiskExplanation,
    pub source: ExplanationSource,
}
