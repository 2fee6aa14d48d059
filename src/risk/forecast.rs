// Forward-looking risks that are not yet reflected in the score
use crate::models::{CheckSeverity, TokenData, UpcomingRisk};

const SIGNIFICANT_LOCKED_SHARE: f64 = 0.20;
const MAJOR_LOCKED_SHARE: f64 = 0.50;
const ACTIVE_DEPLOYER_TX: u64 = 20;
const DEPLOYER_HOLDING_THRESHOLD: f64 = 0.05;
const EARLY_STAGE_AGE_DAYS: f64 = 30.0;
const EARLY_STAGE_HOLDERS: u64 = 100;

/// List the upcoming risks for a token, or `None` when nothing is pending.
pub fn forecast_upcoming_risks(data: &TokenData) -> Option<Vec<UpcomingRisk>> {
    let mut risks = Vec::new();

    if let Some(locked) = data.locked_supply_ratio() {
        if locked >= SIGNIFICANT_LOCKED_SHARE {
            let severity = if locked >= MAJOR_LOCKED_SHARE {
                CheckSeverity::Critical
            } else {
                CheckSeverity::Warning
            };
            risks.push(UpcomingRisk {
                category: "supply_unlock".to_string(),
                description: format!(
                    "{:.0}% of total supply is not yet circulating; unlocks will add sell pressure",
                    locked * 100.0
                ),
                severity,
            });
        }
    }

    if data.is_mintable == Some(true) && data.is_supply_uncapped() {
        risks.push(UpcomingRisk {
            category: "future_minting".to_string(),
            description: "Supply is uncapped and minting is still possible".to_string(),
            severity: CheckSeverity::Warning,
        });
    }

    if data.liquidity_locked == Some(false) {
        risks.push(UpcomingRisk {
            category: "liquidity_withdrawal".to_string(),
            description: "Unlocked liquidity can be pulled at any time".to_string(),
            severity: CheckSeverity::Warning,
        });
    }

    if let (Some(txs), Some(holding)) = (data.deployer_tx_last_7_days, data.deployer_holding_pct) {
        if txs >= ACTIVE_DEPLOYER_TX && holding >= DEPLOYER_HOLDING_THRESHOLD {
            risks.push(UpcomingRisk {
                category: "deployer_distribution".to_string(),
                description: format!(
                    "Deployer is active ({} transactions in 7 days) while holding {:.1}% of supply",
                    txs,
                    holding * 100.0
                ),
                severity: CheckSeverity::Warning,
            });
        }
    }

    if let (Some(age), Some(holders)) = (data.age_days, data.holder_count) {
        if age < EARLY_STAGE_AGE_DAYS && holders < EARLY_STAGE_HOLDERS {
            risks.push(UpcomingRisk {
                category: "early_stage_volatility".to_string(),
                description: format!(
                    "Only {:.0} days old with {} holders; expect sharp price swings",
                    age, holders
                ),
                severity: CheckSeverity::Info,
            });
        }
    }

    if risks.is_empty() {
        None
    } else {
        Some(risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChainType;
    use chrono::Utc;

    fn token() -> TokenData {
        TokenData::new("0x1111111111111111111111111111111111111111", ChainType::Evm, Utc::now())
    }

    #[test]
    fn test_nothing_pending() {
        let mut data = token();
        data.max_supply = Some(1_000.0);
        data.is_mintable = Some(true);
        data.liquidity_locked = Some(true);
        assert!(forecast_upcoming_risks(&data).is_none());
    }

    #[test]
    fn test_supply_unlock_severity() {
        let mut data = token();
        data.total_supply = Some(1_000.0);
        data.circulating_supply = Some(700.0);
        let risks = forecast_upcoming_risks(&data).unwrap_or_default();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, "supply_unlock");
        assert_eq!(risks[0].severity, CheckSeverity::Warning);

        data.circulating_supply = Some(400.0);
        let risks = forecast_upcoming_risks(&data).unwrap_or_default();
        assert_eq!(risks[0].severity, CheckSeverity::Critical);
    }

    #[test]
    fn test_deployer_and_early_stage() {
        let mut data = token();
        data.deployer_tx_last_7_days = Some(25);
        data.deployer_holding_pct = Some(0.08);
        data.age_days = Some(3.0);
        data.holder_count = Some(40);
        let categories: Vec<String> = forecast_upcoming_risks(&data)
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(categories, vec!["deployer_distribution", "early_stage_volatility"]);
    }
}
