use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{ChainType, CheckSeverity, FactorKind, FactorScore, SecurityCheck};

/// Ordered presentational band derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// `[0,30) LOW`, `[30,60) MEDIUM`, `[60,80) HIGH`, `[80,100] CRITICAL`.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Medium,
            60..=79 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataTier {
    Full,
    Partial,
    Minimal,
}

impl DataTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataTier::Full => "FULL",
            DataTier::Partial => "PARTIAL",
            DataTier::Minimal => "MINIMAL",
        }
    }
}

/// Exact weighted contribution of one factor to the base score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: FactorKind,
    pub score: Decimal,
    pub weight: Decimal,
    pub contribution: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverrideKind {
    CriticalFlagLadder,
    BattleTested,
}

impl OverrideKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideKind::CriticalFlagLadder => "CRITICAL_FLAG_LADDER",
            OverrideKind::BattleTested => "BATTLE_TESTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedOverride {
    pub kind: OverrideKind,
    pub score_before: u8,
    pub score_after: u8,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingRisk {
    pub category: String,
    pub description: String,
    pub severity: CheckSeverity,
}

/// Complete, explainable analysis of one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub token_address: String,
    pub chain: ChainType,
    pub overall_risk_score: u8,
    pub risk_level: RiskLevel,
    pub base_score: u8,
    pub confidence_score: u8,
    pub data_tier: DataTier,
    pub data_freshness: f64,
    pub breakdown: BTreeMap<String, u8>,
    pub factors: Vec<FactorScore>,
    pub contributions: Vec<FactorContribution>,
    pub critical_flags: Vec<String>,
    pub warning_flags: Vec<String>,
    pub positive_signals: Vec<String>,
    pub security_checks: Vec<SecurityCheck>,
    pub data_sources: Vec<String>,
    pub upcoming_risks: Option<Vec<UpcomingRisk>>,
    pub override_applied: bool,
    pub override_reason: Option<String>,
    pub overrides: Vec<AppliedOverride>,
    pub analyzed_at: DateTime<Utc>,
}

impl RiskResult {
    pub fn factor(&self, kind: FactorKind) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.name == kind)
    }

    /// Factors ordered by weighted contribution, largest first.
    pub fn top_contributions(&self, limit: usize) -> Vec<&FactorContribution> {
        let mut sorted: Vec<&FactorContribution> = self.contributions.iter().collect();
        sorted.sort_by(|a, b| b.contribution.cmp(&a.contribution).then(a.factor.cmp(&b.factor)));
        sorted.truncate(limit);
        sorted
    }

    /// Critical findings first, then warnings.
    pub fn red_flags(&self) -> Vec<String> {
        self.critical_flags
            .iter()
            .chain(self.warning_flags.iter())
            .cloned()
            .collect()
    }
}
