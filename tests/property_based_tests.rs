use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use quickcheck_macros::quickcheck;
use token_risk_engine::{
    models::{ChainType, TokenData},
    risk::{
        apply_critical_override, concentration_curve, get_weights, score_holder_concentration,
        EngineConfig, RiskEngine,
    },
};

/// Property-based tests for the scoring engine invariants

fn chain_and_address() -> impl Strategy<Value = (ChainType, String)> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 20).prop_map(|bytes| {
            let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            (ChainType::Evm, format!("0x{}", hex))
        }),
        Just((ChainType::Solana, "So11111111111111111111111111111111111111112".to_string())),
        Just((
            ChainType::Cardano,
            "f0ff48bbb7bbe9d59a40f1ce90e9e9d0ff5002ec48f232b49ca0fb9a".to_string()
        )),
        Just((ChainType::Other, "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".to_string())),
    ]
}

fn amount() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(0.0..1e12f64)
}

fn fraction() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(0.0..=1.0f64)
}

fn tax() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(0.0..=100.0f64)
}

fn flag() -> impl Strategy<Value = Option<bool>> {
    prop::option::of(any::<bool>())
}

prop_compose! {
    fn token_data()(
        (chain, address) in chain_and_address(),
        market in (amount(), amount(), amount(), amount()),
        supply in (amount(), amount(), amount(), amount()),
        holders in (prop::option::of(0u64..5_000_000), fraction(), prop::option::of(0u64..1_000_000)),
        age in prop::option::of(0.0..5_000.0f64),
        flags in (flag(), flag(), flag(), flag(), flag(), flag(), flag()),
        taxes in (tax(), tax()),
        deployer in (fraction(), prop::option::of(0u64..500)),
        detailed in any::<bool>(),
    ) -> TokenData {
        let mut data = TokenData::new(address, chain, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        (data.market_cap, data.fully_diluted_value, data.liquidity_usd, data.volume_24h) = market;
        (data.total_supply, data.circulating_supply, data.max_supply, data.burned_supply) = supply;
        (data.holder_count, data.top10_holders_pct, data.tx_count_24h) = holders;
        data.age_days = age;
        (
            data.is_honeypot,
            data.is_mintable,
            data.has_freeze_authority,
            data.owner_renounced,
            data.is_open_source,
            data.is_proxy,
            data.liquidity_locked,
        ) = flags;
        (data.buy_tax_pct, data.sell_tax_pct) = taxes;
        (data.deployer_holding_pct, data.deployer_tx_last_7_days) = deployer;
        data.has_detailed_security_data = detailed;
        data
    }
}

proptest! {
    #[test]
    fn test_scores_stay_in_bounds(data in token_data()) {
        let engine = RiskEngine::new(EngineConfig::default()).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap();
        let result = engine.analyze_at(&data, now).unwrap();

        prop_assert!(result.overall_risk_score <= 100);
        prop_assert!(result.confidence_score <= 100);
        prop_assert!((0.0..=1.0).contains(&result.data_freshness));
        prop_assert!(result.factors.iter().all(|f| (0.0..=100.0).contains(&f.score)));
        prop_assert!(!result.data_sources.is_empty());
        if !data.has_detailed_security_data {
            prop_assert!(result.confidence_score <= 70);
        }
    }

    #[test]
    fn test_analysis_is_deterministic(data in token_data()) {
        let engine = RiskEngine::new(EngineConfig::default()).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap();
        prop_assert_eq!(engine.analyze_at(&data, now).unwrap(), engine.analyze_at(&data, now).unwrap());
    }

    #[test]
    fn test_concentration_is_monotonic(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(concentration_curve(low) <= concentration_curve(high));

        let mut data = TokenData::new("0x1111111111111111111111111111111111111111", ChainType::Evm, Utc::now());
        data.top10_holders_pct = Some(low);
        let low_score = score_holder_concentration(&data).score;
        data.top10_holders_pct = Some(high);
        let high_score = score_holder_concentration(&data).score;
        prop_assert!(low_score <= high_score);
    }

    #[test]
    fn test_override_never_lowers_score(base in 0u8..=100, count in 0usize..20) {
        let outcome = apply_critical_override(base, count);
        prop_assert!(outcome.score >= base);
        prop_assert!(outcome.score <= 100);
        prop_assert_eq!(outcome.applied, outcome.score != base);
    }
}

#[quickcheck]
fn ladder_is_monotonic_in_critical_count(base: u8, count: u8) -> bool {
    let base = base % 101;
    let count = count as usize;
    apply_critical_override(base, count).score <= apply_critical_override(base, count + 1).score
}

#[quickcheck]
fn weights_always_sum_to_one(selector: u8) -> bool {
    let chain = match selector % 4 {
        0 => ChainType::Evm,
        1 => ChainType::Solana,
        2 => ChainType::Cardano,
        _ => ChainType::Other,
    };
    get_weights(chain).total() == rust_decimal::Decimal::ONE
}
