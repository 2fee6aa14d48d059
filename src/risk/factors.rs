// Factor scorer: raw token data -> independent 0-100 risk sub-scores
use tracing::debug;

use crate::models::{ChainType, FactorKind, FactorQuality, FactorScore, TokenData};
use crate::utils::math::{lerp, log_interpolate};

// Contract/authority penalties
const MINT_AUTHORITY_PENALTY: f64 = 30.0;
const FREEZE_AUTHORITY_PENALTY: f64 = 35.0;
const OWNER_NOT_RENOUNCED_PENALTY: f64 = 20.0;
const CLOSED_SOURCE_PENALTY: f64 = 25.0;
const PROXY_PENALTY: f64 = 15.0;

const UNCAPPED_SUPPLY_PENALTY: f64 = 30.0;
const LOCKED_SUPPLY_WEIGHT: f64 = 70.0;

const TAX_MULTIPLIER: f64 = 1.5;
const HIGH_TAX_THRESHOLD_PCT: f64 = 10.0;
const HIGH_TAX_STEP_PENALTY: f64 = 25.0;
const NON_EVM_TAX_ESTIMATE: f64 = 10.0;

/// Score every factor for a token. Pure; never fails.
///
/// Missing inputs lower a factor's quality instead of failing; a factor with
/// no usable input reports the neutral score so aggregation has no holes.
pub fn score_factors(data: &TokenData) -> Vec<FactorScore> {
    let factors = vec![
        score_supply_dilution(data),
        score_holder_concentration(data),
        score_liquidity_depth(data),
        score_contract_control(data),
        score_tax_fee(data),
        score_activity(data),
        score_burn_deflation(data),
        score_token_age(data),
    ];

    for factor in &factors {
        debug!(
            token = %data.address,
            factor = %factor.name,
            score = factor.score,
            quality = factor.quality.as_str(),
            "Scored risk factor"
        );
    }

    factors
}

pub fn score_supply_dilution(data: &TokenData) -> FactorScore {
    let uncapped = data.is_supply_uncapped();
    let uncapped_penalty = if uncapped { UNCAPPED_SUPPLY_PENALTY } else { 0.0 };
    let uncapped_note = if uncapped { ", supply is uncapped" } else { "" };

    if let Some(locked) = data.locked_supply_ratio() {
        let score = LOCKED_SUPPLY_WEIGHT * locked + uncapped_penalty;
        return FactorScore::new(
            FactorKind::SupplyDilution,
            score,
            FactorQuality::Full,
            format!("{:.1}% of total supply not yet circulating{}", locked * 100.0, uncapped_note),
        );
    }

    match (data.market_cap, data.fully_diluted_value) {
        (Some(market_cap), Some(fdv)) if fdv > 0.0 => {
            let locked = (1.0 - market_cap / fdv).clamp(0.0, 1.0);
            FactorScore::new(
                FactorKind::SupplyDilution,
                LOCKED_SUPPLY_WEIGHT * locked + uncapped_penalty,
                FactorQuality::Partial,
                format!(
                    "Market cap is {:.1}% of fully diluted value{}",
                    (1.0 - locked) * 100.0,
                    uncapped_note
                ),
            )
        }
        _ => FactorScore::missing(FactorKind::SupplyDilution, "No supply or valuation data available"),
    }
}

/// Top-10 holder share mapped through a piecewise-linear, non-decreasing curve.
pub fn concentration_curve(top10_fraction: f64) -> f64 {
    let f = top10_fraction.clamp(0.0, 1.0);
    if f <= 0.1 {
        f * 100.0
    } else if f <= 0.3 {
        lerp(f, 0.1, 0.3, 10.0, 30.0)
    } else if f < 0.85 {
        lerp(f, 0.3, 0.85, 30.0, 100.0)
    } else {
        100.0
    }
}

pub fn score_holder_concentration(data: &TokenData) -> FactorScore {
    if let Some(top10) = data.top10_holders_pct {
        return FactorScore::new(
            FactorKind::HolderConcentration,
            concentration_curve(top10),
            FactorQuality::Full,
            format!("Top 10 holders control {:.1}% of supply", top10 * 100.0),
        );
    }

    if let Some(holders) = data.holder_count {
        let score = log_interpolate(holders as f64, 100.0, 10_000.0, 80.0, 30.0);
        return FactorScore::new(
            FactorKind::HolderConcentration,
            score,
            FactorQuality::Estimated,
            format!("Estimated from {} holders; top-holder distribution unavailable", holders),
        );
    }

    FactorScore::missing(FactorKind::HolderConcentration, "No holder distribution data available")
}

pub fn score_liquidity_depth(data: &TokenData) -> FactorScore {
    match (data.liquidity_usd, data.market_cap) {
        (Some(liquidity), _) if liquidity <= 0.0 => FactorScore::new(
            FactorKind::LiquidityDepth,
            100.0,
            FactorQuality::Full,
            "No liquidity available",
        ),
        (Some(liquidity), Some(market_cap)) if market_cap > 0.0 => {
            let ratio = liquidity / market_cap;
            FactorScore::new(
                FactorKind::LiquidityDepth,
                log_interpolate(ratio, 0.01, 0.10, 90.0, 10.0),
                FactorQuality::Full,
                format!("Liquidity is {:.2}% of market cap", ratio * 100.0),
            )
        }
        (Some(liquidity), _) => FactorScore::new(
            FactorKind::LiquidityDepth,
            log_interpolate(liquidity, 10_000.0, 1_000_000.0, 90.0, 10.0),
            FactorQuality::Partial,
            format!("${:.0} liquidity; market cap unknown", liquidity),
        ),
        (None, _) => FactorScore::missing(FactorKind::LiquidityDepth, "No liquidity data available"),
    }
}

struct AuthorityInput {
    known: Option<bool>,
    penalty: f64,
    finding: &'static str,
}

/// Authority inputs considered per chain: (required flags, optional flags).
fn authority_inputs(data: &TokenData) -> (Vec<AuthorityInput>, Vec<AuthorityInput>) {
    let mint = AuthorityInput {
        known: data.is_mintable,
        penalty: MINT_AUTHORITY_PENALTY,
        finding: "mint authority active",
    };
    match data.chain {
        ChainType::Evm | ChainType::Other => (
            vec![
                mint,
                AuthorityInput {
                    known: data.owner_renounced.map(|renounced| !renounced),
                    penalty: OWNER_NOT_RENOUNCED_PENALTY,
                    finding: "owner not renounced",
                },
                AuthorityInput {
                    known: data.is_open_source.map(|open| !open),
                    penalty: CLOSED_SOURCE_PENALTY,
                    finding: "source not verified",
                },
            ],
            vec![AuthorityInput {
                known: data.is_proxy,
                penalty: PROXY_PENALTY,
                finding: "upgradeable proxy",
            }],
        ),
        ChainType::Solana => (
            vec![
                mint,
                AuthorityInput {
                    known: data.has_freeze_authority,
                    penalty: FREEZE_AUTHORITY_PENALTY,
                    finding: "freeze authority active",
                },
            ],
            Vec::new(),
        ),
        ChainType::Cardano => (vec![mint], Vec::new()),
    }
}

pub fn score_contract_control(data: &TokenData) -> FactorScore {
    let (required, optional) = authority_inputs(data);
    let known_required = required.iter().filter(|input| input.known.is_some()).count();

    if known_required == 0 {
        return FactorScore::missing(FactorKind::ContractControl, "No contract or authority data available");
    }

    let findings: Vec<&AuthorityInput> = required
        .iter()
        .chain(optional.iter())
        .filter(|input| input.known == Some(true))
        .collect();
    let score = findings.iter().fold(0.0, |acc, input| acc + input.penalty);

    // A detailed scan that reports no risky permission covers the flags it left unset.
    let quality = if known_required == required.len()
        || (data.has_detailed_security_data && findings.is_empty())
    {
        FactorQuality::Full
    } else {
        FactorQuality::Partial
    };

    let rationale = if findings.is_empty() {
        "No risky contract permissions detected".to_string()
    } else {
        findings.iter().map(|input| input.finding).collect::<Vec<_>>().join(", ")
    };

    FactorScore::new(FactorKind::ContractControl, score.min(100.0), quality, rationale)
}

pub fn score_tax_fee(data: &TokenData) -> FactorScore {
    let (quality, buy, sell) = match (data.buy_tax_pct, data.sell_tax_pct) {
        (Some(buy), Some(sell)) => (FactorQuality::Full, buy, sell),
        (Some(buy), None) => (FactorQuality::Partial, buy, 0.0),
        (None, Some(sell)) => (FactorQuality::Partial, 0.0, sell),
        (None, None) => {
            return match data.chain {
                ChainType::Solana | ChainType::Cardano => FactorScore::new(
                    FactorKind::TaxFee,
                    NON_EVM_TAX_ESTIMATE,
                    FactorQuality::Estimated,
                    format!("Transfer taxes are uncommon on {}; no tax data reported", data.chain),
                ),
                ChainType::Evm | ChainType::Other => {
                    FactorScore::missing(FactorKind::TaxFee, "No buy/sell tax data available")
                }
            };
        }
    };

    let mut score = (buy + sell) * TAX_MULTIPLIER;
    if buy > HIGH_TAX_THRESHOLD_PCT || sell > HIGH_TAX_THRESHOLD_PCT {
        score += HIGH_TAX_STEP_PENALTY;
    }

    FactorScore::new(
        FactorKind::TaxFee,
        score.min(100.0),
        quality,
        format!("Buy tax {:.1}%, sell tax {:.1}%", buy, sell),
    )
}

pub fn score_activity(data: &TokenData) -> FactorScore {
    let holder_score = data
        .holder_count
        .map(|holders| log_interpolate(holders as f64, 50.0, 10_000.0, 100.0, 0.0));
    let tx_score = data
        .tx_count_24h
        .map(|txs| log_interpolate(txs as f64, 10.0, 1_000.0, 100.0, 0.0));

    let (quality, base) = match (holder_score, tx_score) {
        (Some(h), Some(t)) => (FactorQuality::Full, (h + t) / 2.0),
        (Some(h), None) if data.age_days.is_some() => (FactorQuality::Full, h),
        (Some(h), None) => (FactorQuality::Partial, h),
        (None, Some(t)) => (FactorQuality::Partial, t),
        (None, None) => {
            return FactorScore::missing(FactorKind::Activity, "No holder or transaction activity data available")
        }
    };

    let age_factor = match data.age_days {
        Some(age) if age < 7.0 => 1.25,
        Some(age) if age < 30.0 => 1.1,
        _ => 1.0,
    };

    let holders = data
        .holder_count
        .map(|h| h.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let txs = data
        .tx_count_24h
        .map(|t| t.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    FactorScore::new(
        FactorKind::Activity,
        (base * age_factor).min(100.0),
        quality,
        format!("{} holders, {} transactions in 24h", holders, txs),
    )
}

pub fn score_burn_deflation(data: &TokenData) -> FactorScore {
    match (data.burned_supply, data.total_supply) {
        (Some(burned), Some(total)) if burned + total > 0.0 => {
            let ratio = burned / (total + burned);
            FactorScore::new(
                FactorKind::BurnDeflation,
                (50.0 - 100.0 * ratio).max(0.0),
                FactorQuality::Full,
                format!("{:.1}% of minted supply burned", ratio * 100.0),
            )
        }
        (Some(burned), _) => {
            let score = if burned > 0.0 { 40.0 } else { 50.0 };
            FactorScore::new(
                FactorKind::BurnDeflation,
                score,
                FactorQuality::Partial,
                format!("{:.0} tokens burned; total supply unknown", burned),
            )
        }
        (None, _) if data.total_supply.is_some() || data.market_cap.is_some() => FactorScore::new(
            FactorKind::BurnDeflation,
            50.0,
            FactorQuality::Estimated,
            "No burn data reported; assuming no deflation",
        ),
        (None, _) => FactorScore::missing(FactorKind::BurnDeflation, "No burn or supply data available"),
    }
}

/// Saturating age curve: risk drops quickly over the first ~90 days then flattens near 5.
pub fn age_curve(age_days: f64) -> f64 {
    5.0 + 95.0 * (-age_days.max(0.0) / 30.0).exp()
}

pub fn score_token_age(data: &TokenData) -> FactorScore {
    match data.age_days {
        Some(age) => FactorScore::new(
            FactorKind::TokenAge,
            age_curve(age),
            FactorQuality::Full,
            format!("Token is {:.0} days old", age),
        ),
        None => FactorScore::missing(FactorKind::TokenAge, "Token age unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn evm_token() -> TokenData {
        TokenData::new("0x1111111111111111111111111111111111111111", ChainType::Evm, Utc::now())
    }

    #[test]
    fn test_all_factors_present_for_empty_data() {
        let factors = score_factors(&evm_token());
        assert_eq!(factors.len(), FactorKind::ALL.len());
        for factor in &factors {
            assert_eq!(factor.quality, FactorQuality::Missing, "{} should be missing", factor.name);
            assert_eq!(factor.score, 50.0);
        }
    }

    #[test]
    fn test_concentration_curve_shape() {
        assert_eq!(concentration_curve(0.0), 0.0);
        assert!((concentration_curve(0.1) - 10.0).abs() < 1e-9);
        assert!((concentration_curve(0.12) - 12.0).abs() < 1e-9);
        assert_eq!(concentration_curve(0.3), 30.0);
        assert_eq!(concentration_curve(0.85), 100.0);
        assert_eq!(concentration_curve(1.0), 100.0);

        let mut previous = 0.0;
        for step in 0..=100 {
            let value = concentration_curve(step as f64 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_concentration_estimated_from_holder_count() {
        let mut data = evm_token();
        data.holder_count = Some(50);
        let factor = score_holder_concentration(&data);
        assert_eq!(factor.quality, FactorQuality::Estimated);
        assert_eq!(factor.score, 80.0);
    }

    #[test]
    fn test_liquidity_ratio_bounds() {
        let mut data = evm_token();
        data.market_cap = Some(1_000_000.0);

        data.liquidity_usd = Some(5_000.0);
        assert_eq!(score_liquidity_depth(&data).score, 90.0);

        data.liquidity_usd = Some(200_000.0);
        assert_eq!(score_liquidity_depth(&data).score, 10.0);

        data.liquidity_usd = Some(0.0);
        assert_eq!(score_liquidity_depth(&data).score, 100.0);
    }

    #[test]
    fn test_liquidity_without_market_cap_is_partial() {
        let mut data = evm_token();
        data.liquidity_usd = Some(2_000_000.0);
        let factor = score_liquidity_depth(&data);
        assert_eq!(factor.quality, FactorQuality::Partial);
        assert_eq!(factor.score, 10.0);
    }

    #[test]
    fn test_contract_control_penalties_sum() {
        let mut data = evm_token();
        data.is_mintable = Some(true);
        data.owner_renounced = Some(false);
        data.is_open_source = Some(false);
        data.is_proxy = Some(true);
        let factor = score_contract_control(&data);
        assert_eq!(factor.quality, FactorQuality::Full);
        assert_eq!(factor.score, 90.0);
    }

    #[test]
    fn test_contract_control_partial_when_some_flags_unknown() {
        let mut data = evm_token();
        data.is_mintable = Some(true);
        data.owner_renounced = Some(false);
        let factor = score_contract_control(&data);
        assert_eq!(factor.quality, FactorQuality::Partial);
        assert_eq!(factor.score, 50.0);
    }

    #[test]
    fn test_contract_control_full_when_detailed_scan_is_clean() {
        let mut data = evm_token();
        data.owner_renounced = Some(true);
        assert_eq!(score_contract_control(&data).quality, FactorQuality::Partial);

        data.has_detailed_security_data = true;
        let factor = score_contract_control(&data);
        assert_eq!(factor.quality, FactorQuality::Full);
        assert_eq!(factor.score, 0.0);
        assert!(factor.score.is_sign_positive());

        data.owner_renounced = Some(false);
        assert_eq!(score_contract_control(&data).quality, FactorQuality::Partial);
    }

    #[test]
    fn test_activity_from_holders_and_age_is_full() {
        let mut data = evm_token();
        data.holder_count = Some(492_693);
        assert_eq!(score_activity(&data).quality, FactorQuality::Partial);
        data.age_days = Some(245.0);
        assert_eq!(score_activity(&data).quality, FactorQuality::Full);
    }

    #[test]
    fn test_burn_estimated_when_market_data_present() {
        let mut data = evm_token();
        data.market_cap = Some(1_000_000.0);
        let factor = score_burn_deflation(&data);
        assert_eq!(factor.quality, FactorQuality::Estimated);
        assert_eq!(factor.score, 50.0);
    }

    #[test]
    fn test_solana_authorities() {
        let mut data = TokenData::new("So11111111111111111111111111111111111111112", ChainType::Solana, Utc::now());
        data.is_mintable = Some(true);
        data.has_freeze_authority = Some(true);
        let factor = score_contract_control(&data);
        assert_eq!(factor.quality, FactorQuality::Full);
        assert_eq!(factor.score, 65.0);
    }

    #[test]
    fn test_tax_step_penalty() {
        let mut data = evm_token();
        data.buy_tax_pct = Some(0.0);
        data.sell_tax_pct = Some(25.0);
        let factor = score_tax_fee(&data);
        assert_eq!(factor.quality, FactorQuality::Full);
        assert_eq!(factor.score, 62.5);

        data.sell_tax_pct = Some(5.0);
        assert_eq!(score_tax_fee(&data).score, 7.5);
    }

    #[test]
    fn test_missing_tax_on_solana_is_estimated() {
        let data = TokenData::new("mint", ChainType::Solana, Utc::now());
        let factor = score_tax_fee(&data);
        assert_eq!(factor.quality, FactorQuality::Estimated);
        assert_eq!(factor.score, NON_EVM_TAX_ESTIMATE);
    }

    #[test]
    fn test_new_token_activity_is_amplified() {
        let mut data = evm_token();
        data.holder_count = Some(500);
        data.tx_count_24h = Some(100);
        let established = score_activity(&data).score;
        data.age_days = Some(2.0);
        let fresh = score_activity(&data).score;
        assert!(fresh > established);
    }

    #[test]
    fn test_burn_reduces_risk() {
        let mut data = evm_token();
        data.total_supply = Some(1_000.0);
        data.burned_supply = Some(0.0);
        assert_eq!(score_burn_deflation(&data).score, 50.0);
        data.burned_supply = Some(1_000.0);
        assert_eq!(score_burn_deflation(&data).score, 0.0);
    }

    #[test]
    fn test_age_curve_saturates() {
        assert_eq!(age_curve(0.0), 100.0);
        assert!(age_curve(90.0) < 10.0);
        assert!(age_curve(365.0) - 5.0 < 0.01);
    }

    #[test]
    fn test_uncapped_supply_adds_risk() {
        let mut data = evm_token();
        data.total_supply = Some(1_000.0);
        data.circulating_supply = Some(1_000.0);
        data.max_supply = Some(1_000.0);
        assert_eq!(score_supply_dilution(&data).score, 0.0);
        data.max_supply = None;
        assert_eq!(score_supply_dilution(&data).score, UNCAPPED_SUPPLY_PENALTY);
    }
}
