// Risk engine - validates a token snapshot and produces an explainable RiskResult
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::models::{
    CheckSeverity, OverrideKind, RiskLevel, RiskResult, TokenData,
};
use crate::risk::{
    aggregate, apply_battle_tested_override, apply_critical_override, assess_confidence,
    evaluate_security_checks, forecast_upcoming_risks, get_weights, score_factors,
    BattleTestedConfig, RiskError,
};
use crate::security::TokenDataValidator;
use crate::utils::math::to_score;
use crate::utils::time::data_freshness;

/// Source tag appended when any factor relied on engine estimates or no provider was named.
pub const ENGINE_ESTIMATES_SOURCE: &str = "engine_estimates";

/// Configuration for the risk engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub staleness_window_minutes: i64,
    pub battle_tested: BattleTestedConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            staleness_window_minutes: 60,
            battle_tested: BattleTestedConfig::default(),
        }
    }
}

/// Stateless scoring engine. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: EngineConfig,
    validator: TokenDataValidator,
}

impl RiskEngine {
    pub fn new(config: EngineConfig) -> Result<Self, RiskError> {
        if config.staleness_window_minutes <= 0 {
            return Err(RiskError::ConfigurationError {
                message: "staleness window must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&config.battle_tested.discount) {
            return Err(RiskError::ConfigurationError {
                message: format!(
                    "battle-tested discount must be between 0 and 1 (got {})",
                    config.battle_tested.discount
                ),
            });
        }

        Ok(Self {
            config,
            validator: TokenDataValidator::new()?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a token as of the current instant.
    pub fn analyze(&self, data: &TokenData) -> Result<RiskResult, RiskError> {
        self.analyze_at(data, Utc::now())
    }

    /// Analyze a token as of `now`. Identical input and instant give identical output.
    pub fn analyze_at(&self, data: &TokenData, now: DateTime<Utc>) -> Result<RiskResult, RiskError> {
        let data = self.validator.validate(data)?;
        Ok(self.score(&data, now))
    }

    fn score(&self, data: &TokenData, now: DateTime<Utc>) -> RiskResult {
        let factors = score_factors(data);
        let weights = get_weights(data.chain);
        let aggregate = aggregate(&factors, &weights);
        let confidence = assess_confidence(&factors, data.has_detailed_security_data);

        let freshness = data_freshness(
            data.data_timestamp,
            now,
            Duration::minutes(self.config.staleness_window_minutes),
        );

        let security_checks = evaluate_security_checks(data);
        let messages_with = |severity: CheckSeverity| -> Vec<String> {
            security_checks
                .iter()
                .filter(|c| c.severity == severity)
                .map(|c| c.message.clone())
                .collect()
        };
        let critical_flags = messages_with(CheckSeverity::Critical);
        let warning_flags = messages_with(CheckSeverity::Warning);
        let positive_signals = messages_with(CheckSeverity::Info);

        let base_score = aggregate.base_score;
        let mut overrides = Vec::new();

        let ladder = apply_critical_override(base_score, critical_flags.len());
        let after_ladder = ladder.score;
        overrides.extend(ladder.into_applied(OverrideKind::CriticalFlagLadder, base_score));

        let battle_tested = apply_battle_tested_override(after_ladder, data, &self.config.battle_tested);
        let final_score = battle_tested.score;
        overrides.extend(battle_tested.into_applied(OverrideKind::BattleTested, after_ladder));

        let override_reason = if overrides.is_empty() {
            None
        } else {
            Some(
                overrides
                    .iter()
                    .map(|o| o.reason.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };

        let breakdown: BTreeMap<String, u8> = factors
            .iter()
            .map(|f| (f.name.as_str().to_string(), to_score(f.score)))
            .collect();

        let mut data_sources: Vec<String> = Vec::new();
        for source in &data.data_sources {
            if !data_sources.contains(source) {
                data_sources.push(source.clone());
            }
        }
        let used_estimates = factors.iter().any(|f| f.quality.is_engine_estimate());
        if (used_estimates || data_sources.is_empty())
            && !data_sources.iter().any(|s| s == ENGINE_ESTIMATES_SOURCE)
        {
            data_sources.push(ENGINE_ESTIMATES_SOURCE.to_string());
        }

        let risk_level = RiskLevel::from_score(final_score);

        for applied in &overrides {
            debug!(
                token = %data.address,
                kind = applied.kind.as_str(),
                before = applied.score_before,
                after = applied.score_after,
                "Applied score override"
            );
            metrics::increment_counter!("token_risk_overrides_total", "kind" => applied.kind.as_str());
        }
        metrics::increment_counter!(
            "token_risk_analyses_total",
            "chain" => data.chain.as_str(),
            "risk_level" => risk_level.as_str()
        );
        metrics::histogram!("token_risk_score", final_score as f64, "chain" => data.chain.as_str());

        info!(
            token = %data.address,
            chain = %data.chain,
            base_score = base_score,
            risk_score = final_score,
            risk_level = %risk_level,
            confidence = confidence.confidence,
            data_tier = confidence.tier.as_str(),
            critical_flags = critical_flags.len(),
            "Token risk analysis complete"
        );

        RiskResult {
            token_address: data.address.clone(),
            chain: data.chain,
            overall_risk_score: final_score,
            risk_level,
            base_score,
            confidence_score: confidence.confidence,
            data_tier: confidence.tier,
            data_freshness: (freshness * 1000.0).round() / 1000.0,
            breakdown,
            factors,
            contributions: aggregate.contributions,
            critical_flags,
            warning_flags,
            positive_signals,
            security_checks,
            data_sources,
            upcoming_risks: forecast_upcoming_risks(data),
            override_applied: !overrides.is_empty(),
            override_reason,
            overrides,
            analyzed_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChainType;

    const EVM_ADDRESS: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

    fn engine() -> RiskEngine {
        RiskEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            staleness_window_minutes: 0,
            ..EngineConfig::default()
        };
        assert!(RiskEngine::new(config).is_err());
    }

    #[test]
    fn test_empty_snapshot_scores_neutral() {
        let now = Utc::now();
        let data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now);
        let result = engine().analyze_at(&data, now).unwrap();
        assert!(result.overall_risk_score <= 100);
        assert_eq!(result.data_tier, crate::models::DataTier::Minimal);
        assert_eq!(result.data_sources, vec![ENGINE_ESTIMATES_SOURCE.to_string()]);
        assert!(!result.override_applied);
        assert_eq!(result.breakdown.len(), 8);
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let data = TokenData::new("not-an-address", ChainType::Evm, Utc::now());
        let err = engine().analyze(&data).unwrap_err();
        assert_eq!(err.field(), Some("address"));
    }

    #[test]
    fn test_data_sources_are_deduplicated() {
        let now = Utc::now();
        let mut data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now);
        data.data_sources = vec!["goplus".into(), "dexscreener".into(), "goplus".into()];
        let result = engine().analyze_at(&data, now).unwrap();
        assert_eq!(
            result.data_sources,
            vec!["goplus".to_string(), "dexscreener".to_string(), ENGINE_ESTIMATES_SOURCE.to_string()]
        );
    }

    #[test]
    fn test_stale_data_reports_low_freshness() {
        let now = Utc::now();
        let data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now - Duration::minutes(45));
        let result = engine().analyze_at(&data, now).unwrap();
        assert!((result.data_freshness - 0.25).abs() < 1e-9);
    }
}
