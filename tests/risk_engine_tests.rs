use chrono::{DateTime, TimeZone, Utc};
use token_risk_engine::{
    models::{ChainType, DataTier, FactorKind, FactorQuality, OverrideKind, RiskLevel, TokenData},
    risk::{EngineConfig, RiskEngine, ENGINE_ESTIMATES_SOURCE},
    utils::math::decimal_to_score,
};

const EVM_ADDRESS: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn engine() -> RiskEngine {
    RiskEngine::new(EngineConfig::default()).unwrap()
}

fn established_token() -> TokenData {
    let mut data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now());
    data.market_cap = Some(2_340_000_000.0);
    data.liquidity_usd = Some(18_900_000.0);
    data.holder_count = Some(492_693);
    data.top10_holders_pct = Some(0.12);
    data.age_days = Some(245.0);
    data.is_honeypot = Some(false);
    data.owner_renounced = Some(true);
    data.buy_tax_pct = Some(0.0);
    data.sell_tax_pct = Some(0.0);
    data.has_detailed_security_data = true;
    data.data_sources = vec!["goplus".to_string(), "dexscreener".to_string()];
    data
}

fn new_risky_token() -> TokenData {
    let mut data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now());
    data.market_cap = Some(50_000.0);
    data.liquidity_usd = Some(2_000.0);
    data.holder_count = Some(35);
    data.top10_holders_pct = Some(0.85);
    data.max_supply = None;
    data.sell_tax_pct = Some(25.0);
    data.age_days = Some(2.0);
    data.is_mintable = Some(true);
    data.owner_renounced = Some(false);
    data.has_detailed_security_data = true;
    data.data_sources = vec!["goplus".to_string()];
    data
}

#[test]
fn test_established_token_is_low_risk() {
    let result = engine().analyze_at(&established_token(), now()).unwrap();

    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.overall_risk_score < 30, "score was {}", result.overall_risk_score);
    assert!(result.confidence_score >= 70, "confidence was {}", result.confidence_score);
    assert!(result.critical_flags.is_empty());
    assert!(!result.positive_signals.is_empty());
    assert!(!result.override_applied);
    assert_eq!(
        result.factor(FactorKind::ContractControl).map(|f| f.quality),
        Some(FactorQuality::Full)
    );
    assert_eq!(
        result.data_sources,
        vec![
            "goplus".to_string(),
            "dexscreener".to_string(),
            ENGINE_ESTIMATES_SOURCE.to_string()
        ]
    );
}

#[test]
fn test_fully_reported_token_reaches_full_tier() {
    let mut data = established_token();
    data.tx_count_24h = Some(5_000);
    data.total_supply = Some(1_000_000_000.0);
    data.circulating_supply = Some(1_000_000_000.0);
    data.max_supply = Some(1_000_000_000.0);
    data.burned_supply = Some(0.0);
    data.is_mintable = Some(false);
    data.is_open_source = Some(true);

    let result = engine().analyze_at(&data, now()).unwrap();

    assert_eq!(result.data_tier, DataTier::Full);
    assert_eq!(result.confidence_score, 100);
    assert_eq!(result.data_sources, vec!["goplus".to_string(), "dexscreener".to_string()]);
}

#[test]
fn test_new_risky_token_is_critical() {
    let result = engine().analyze_at(&new_risky_token(), now()).unwrap();

    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert!(result.critical_flags.len() >= 3, "flags: {:?}", result.critical_flags);
    assert!(result.override_applied);
    assert_eq!(result.overrides[0].kind, OverrideKind::CriticalFlagLadder);
    let expected = (result.base_score as u16 + 35).max(75).min(100) as u8;
    assert_eq!(result.overall_risk_score, expected);
    assert!(result.override_reason.is_some());

    let upcoming = result.upcoming_risks.clone().unwrap_or_default();
    assert!(upcoming.iter().any(|r| r.category == "future_minting"));
    assert!(upcoming.iter().any(|r| r.category == "early_stage_volatility"));
}

#[test]
fn test_fallback_mode_still_returns_complete_result() {
    let mut data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now());
    data.market_cap = Some(12_000_000.0);
    data.liquidity_usd = Some(400_000.0);
    data.holder_count = Some(2_500);
    data.age_days = Some(60.0);
    data.has_detailed_security_data = false;
    data.data_sources = vec!["dexscreener".to_string()];

    let result = engine().analyze_at(&data, now()).unwrap();

    assert!(matches!(result.data_tier, DataTier::Partial | DataTier::Minimal));
    assert!(result.confidence_score <= 70);
    assert_eq!(
        result.data_sources,
        vec!["dexscreener".to_string(), ENGINE_ESTIMATES_SOURCE.to_string()]
    );
    assert_eq!(result.breakdown.len(), FactorKind::ALL.len());
    assert_eq!(
        result.factor(FactorKind::ContractControl).map(|f| f.quality),
        Some(FactorQuality::Missing)
    );
}

#[test]
fn test_battle_tested_discount_applies_to_large_caps() {
    let mut data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now());
    data.market_cap = Some(60_000_000_000.0);
    data.liquidity_usd = Some(900_000_000.0);
    data.top10_holders_pct = Some(0.35);
    data.age_days = Some(3_000.0);
    data.is_honeypot = Some(false);

    let result = engine().analyze_at(&data, now()).unwrap();

    assert!(result.base_score > 0);
    assert!(result.overall_risk_score < result.base_score);
    assert!(result.overall_risk_score <= 25);
    assert!(result
        .overrides
        .iter()
        .any(|o| o.kind == OverrideKind::BattleTested));
}

#[test]
fn test_battle_tested_skipped_for_honeypot() {
    let mut data = TokenData::new(EVM_ADDRESS, ChainType::Evm, now());
    data.market_cap = Some(60_000_000_000.0);
    data.is_honeypot = Some(true);

    let result = engine().analyze_at(&data, now()).unwrap();

    assert!(result.overall_risk_score >= result.base_score);
    assert!(result
        .overrides
        .iter()
        .all(|o| o.kind != OverrideKind::BattleTested));
}

#[test]
fn test_confidence_capped_without_security_data() {
    let mut data = established_token();
    data.has_detailed_security_data = false;

    let result = engine().analyze_at(&data, now()).unwrap();

    assert_eq!(result.confidence_score, 70);
    assert_eq!(result.data_tier, DataTier::Partial);
}

#[test]
fn test_analysis_is_idempotent() {
    let engine = engine();
    let data = new_risky_token();
    let first = engine.analyze_at(&data, now()).unwrap();
    let second = engine.analyze_at(&data, now()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_contributions_reproduce_base_score() {
    for data in [established_token(), new_risky_token()] {
        let result = engine().analyze_at(&data, now()).unwrap();
        let sum = result
            .contributions
            .iter()
            .map(|c| c.contribution)
            .sum::<rust_decimal::Decimal>();
        assert_eq!(decimal_to_score(sum), result.base_score);
    }
}

#[test]
fn test_solana_weights_emphasise_authorities() {
    let mut data = TokenData::new("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", ChainType::Solana, now());
    data.is_mintable = Some(true);
    data.has_freeze_authority = Some(true);

    let result = engine().analyze_at(&data, now()).unwrap();

    assert_eq!(result.critical_flags.len(), 2);
    let control = result
        .contributions
        .iter()
        .find(|c| c.factor == FactorKind::ContractControl)
        .unwrap();
    assert_eq!(control.weight, rust_decimal::Decimal::new(30, 2));
    assert_eq!(result.factor(FactorKind::TaxFee).map(|f| f.quality), Some(FactorQuality::Estimated));
}

#[test]
fn test_malformed_input_names_field() {
    let mut data = established_token();
    data.top10_holders_pct = Some(12.0);
    let err = engine().analyze_at(&data, now()).unwrap_err();
    assert_eq!(err.field(), Some("top10HoldersPct"));
    assert!(err.to_string().contains("top10HoldersPct"));
}

#[test]
fn test_established_token_from_json() {
    let json = r#"{
        "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        "chain": "EVM",
        "marketCap": 2340000000.0,
        "liquidityUSD": 18900000.0,
        "holderCount": 492693,
        "top10HoldersPercentage": 0.12,
        "ageDays": 245.0,
        "isHoneypot": false,
        "ownerRenounced": true,
        "buyTaxPct": 0.0,
        "sellTaxPct": 0.0,
        "hasDetailedSecurityData": true,
        "dataTimestamp": "2025-03-01T12:00:00Z",
        "dataSources": ["goplus"]
    }"#;
    let data: TokenData = serde_json::from_str(json).unwrap();
    let result = engine().analyze_at(&data, now()).unwrap();
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.confidence_score >= 70, "confidence was {}", result.confidence_score);
    assert_eq!(result.data_freshness, 1.0);
}

#[test]
fn test_new_risky_token_from_json() {
    let json = r#"{
        "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        "chain": "EVM",
        "marketCap": 50000.0,
        "liquidityUSD": 2000.0,
        "holderCount": 35,
        "top10HoldersPercentage": 0.85,
        "maxSupply": null,
        "sellTaxPct": 25.0,
        "ageDays": 2.0,
        "isMintable": true,
        "ownerRenounced": false,
        "hasDetailedSecurityData": true,
        "dataTimestamp": "2025-03-01T12:00:00Z"
    }"#;
    let data: TokenData = serde_json::from_str(json).unwrap();
    let result = engine().analyze_at(&data, now()).unwrap();

    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert_eq!(result.critical_flags.len(), 4, "flags: {:?}", result.critical_flags);
    assert_eq!(result.overrides[0].kind, OverrideKind::CriticalFlagLadder);
}

#[test]
fn test_misspelled_field_is_rejected() {
    let json = r#"{
        "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        "chain": "EVM",
        "liquidityUsdc": 2000.0,
        "dataTimestamp": "2025-03-01T12:00:00Z"
    }"#;
    let err = serde_json::from_str::<TokenData>(json).unwrap_err();
    assert!(err.to_string().contains("liquidityUsdc"), "{}", err);
}
