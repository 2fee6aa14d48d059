// Discrete security findings, evaluated per chain family
use crate::models::{ChainType, SecurityCheck, TokenData};
use crate::utils::math::format_usd;

const CRITICAL_CONCENTRATION: f64 = 0.80;
const WARNING_CONCENTRATION: f64 = 0.50;
const HEALTHY_CONCENTRATION: f64 = 0.20;

const CRITICAL_LIQUIDITY_USD: f64 = 5_000.0;
const WARNING_LIQUIDITY_USD: f64 = 50_000.0;
const DEEP_LIQUIDITY_USD: f64 = 1_000_000.0;

const CRITICAL_TAX_PCT: f64 = 20.0;
const WARNING_TAX_PCT: f64 = 10.0;

const CRITICAL_DEPLOYER_HOLDING: f64 = 0.25;
const WARNING_DEPLOYER_HOLDING: f64 = 0.05;
const ACTIVE_DEPLOYER_TX: u64 = 50;

const WIDE_HOLDER_BASE: u64 = 10_000;
const ESTABLISHED_AGE_DAYS: f64 = 365.0;
const LARGE_MARKET_CAP_USD: f64 = 1_000_000_000.0;

/// Evaluate every discrete finding that applies to the token's chain family.
///
/// Findings are returned in a stable order: shared checks first, then the
/// chain-specific ones.
pub fn evaluate_security_checks(data: &TokenData) -> Vec<SecurityCheck> {
    let mut checks = Vec::new();

    check_honeypot(data, &mut checks);

    match data.chain {
        ChainType::Evm | ChainType::Other => {
            check_evm_mint_and_owner(data, &mut checks);
            check_taxes(data, &mut checks);
            check_evm_source(data, &mut checks);
        }
        ChainType::Solana => {
            check_solana_authorities(data, &mut checks);
            check_taxes(data, &mut checks);
        }
        ChainType::Cardano => check_cardano_policy(data, &mut checks),
    }

    check_concentration(data, &mut checks);
    check_liquidity(data, &mut checks);
    check_deployer(data, &mut checks);
    check_maturity(data, &mut checks);

    checks
}

fn check_honeypot(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    match data.is_honeypot {
        Some(true) => checks.push(SecurityCheck::critical(
            "honeypot",
            "Honeypot detected: holders cannot sell this token",
            50,
        )),
        Some(false) if data.has_detailed_security_data => checks.push(SecurityCheck::info(
            "honeypot",
            "Passed honeypot checks: selling is possible",
            -5,
        )),
        _ => {}
    }
}

fn check_evm_mint_and_owner(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    match (data.is_mintable, data.owner_renounced) {
        (Some(true), Some(true)) => checks.push(SecurityCheck::warning(
            "mintable",
            "Contract has a mint function, but ownership is renounced",
            5,
        )),
        (Some(true), Some(false)) => checks.push(SecurityCheck::critical(
            "mintable",
            "Owner can mint new tokens at will, diluting every holder",
            25,
        )),
        (Some(true), None) => checks.push(SecurityCheck::warning(
            "mintable",
            "Contract has a mint function and ownership status is unknown",
            15,
        )),
        (Some(false), _) => checks.push(SecurityCheck::info("mintable", "Supply cannot be minted", -5)),
        (None, _) => {}
    }

    match data.owner_renounced {
        Some(true) => checks.push(SecurityCheck::info("ownership", "Contract ownership is renounced", -10)),
        Some(false) => {
            let message = match &data.owner_address {
                Some(owner) => format!("Contract ownership is not renounced (owner {})", owner),
                None => "Contract ownership is not renounced".to_string(),
            };
            checks.push(SecurityCheck::warning("ownership", message, 10));
        }
        None => {}
    }
}

fn check_taxes(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    let buy = data.buy_tax_pct;
    let sell = data.sell_tax_pct;
    let highest = buy.into_iter().chain(sell).fold(None, |acc: Option<f64>, tax| {
        Some(acc.map_or(tax, |current| current.max(tax)))
    });

    let Some(highest) = highest else {
        return;
    };

    let described = format!(
        "buy {}, sell {}",
        buy.map(|t| format!("{:.1}%", t)).unwrap_or_else(|| "unknown".to_string()),
        sell.map(|t| format!("{:.1}%", t)).unwrap_or_else(|| "unknown".to_string()),
    );

    if highest > CRITICAL_TAX_PCT {
        checks.push(SecurityCheck::critical(
            "high_tax",
            format!("Extreme transfer tax ({}): most of each trade is taken by the contract", described),
            25,
        ));
    } else if highest > WARNING_TAX_PCT {
        checks.push(SecurityCheck::warning(
            "high_tax",
            format!("High transfer tax ({})", described),
            10,
        ));
    } else if buy == Some(0.0) && sell == Some(0.0) {
        checks.push(SecurityCheck::info("zero_tax", "No buy or sell tax", -5));
    }
}

fn check_evm_source(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    match data.is_open_source {
        Some(false) => checks.push(SecurityCheck::warning(
            "closed_source",
            "Contract source code is not verified, so its behaviour cannot be audited",
            10,
        )),
        Some(true) => checks.push(SecurityCheck::info("open_source", "Contract source code is verified", -5)),
        None => {}
    }

    if data.is_proxy == Some(true) {
        checks.push(SecurityCheck::warning(
            "proxy",
            "Contract is an upgradeable proxy; its logic can be replaced",
            10,
        ));
    }
}

fn check_solana_authorities(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    match data.is_mintable {
        Some(true) => checks.push(SecurityCheck::critical(
            "mint_authority",
            "Mint authority is active: new tokens can be minted at any time",
            25,
        )),
        Some(false) => checks.push(SecurityCheck::info("mint_authority", "Mint authority is revoked", -10)),
        None => {}
    }

    match data.has_freeze_authority {
        Some(true) => checks.push(SecurityCheck::critical(
            "freeze_authority",
            "Freeze authority is active: holder accounts can be frozen",
            30,
        )),
        Some(false) => checks.push(SecurityCheck::info("freeze_authority", "Freeze authority is revoked", -10)),
        None => {}
    }
}

fn check_cardano_policy(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    match data.is_mintable {
        Some(true) => checks.push(SecurityCheck::critical(
            "minting_policy",
            "Minting policy is still open: more tokens can be issued",
            25,
        )),
        Some(false) => checks.push(SecurityCheck::info(
            "minting_policy",
            "Minting policy is time-locked; supply is fixed",
            -10,
        )),
        None => {}
    }
}

fn check_concentration(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    let Some(top10) = data.top10_holders_pct else {
        return;
    };
    let pct = top10 * 100.0;

    if top10 >= CRITICAL_CONCENTRATION {
        checks.push(SecurityCheck::critical(
            "holder_concentration",
            format!("Top 10 holders control {:.1}% of supply; a coordinated sell-off would collapse the price", pct),
            20,
        ));
    } else if top10 >= WARNING_CONCENTRATION {
        checks.push(SecurityCheck::warning(
            "holder_concentration",
            format!("Top 10 holders control {:.1}% of supply", pct),
            10,
        ));
    } else if top10 <= HEALTHY_CONCENTRATION {
        checks.push(SecurityCheck::info(
            "holder_concentration",
            format!("Well distributed: top 10 holders control {:.1}% of supply", pct),
            -5,
        ));
    }
}

fn check_liquidity(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    if let Some(liquidity) = data.liquidity_usd {
        if liquidity < CRITICAL_LIQUIDITY_USD {
            checks.push(SecurityCheck::critical(
                "low_liquidity",
                format!("Only {} of liquidity; even small sells will move the price sharply", format_usd(liquidity)),
                20,
            ));
        } else if liquidity < WARNING_LIQUIDITY_USD {
            checks.push(SecurityCheck::warning(
                "low_liquidity",
                format!("Thin liquidity of {}", format_usd(liquidity)),
                10,
            ));
        } else if liquidity >= DEEP_LIQUIDITY_USD {
            checks.push(SecurityCheck::info(
                "deep_liquidity",
                format!("Deep liquidity of {}", format_usd(liquidity)),
                -5,
            ));
        }
    }

    match data.liquidity_locked {
        Some(false) => checks.push(SecurityCheck::warning(
            "liquidity_unlocked",
            "Liquidity is not locked and can be withdrawn by its providers",
            10,
        )),
        Some(true) => checks.push(SecurityCheck::info("liquidity_locked", "Liquidity is locked", -10)),
        None => {}
    }
}

fn check_deployer(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    if let Some(holding) = data.deployer_holding_pct {
        if holding >= CRITICAL_DEPLOYER_HOLDING {
            checks.push(SecurityCheck::critical(
                "deployer_holding",
                format!("Deployer still holds {:.1}% of supply", holding * 100.0),
                20,
            ));
        } else if holding >= WARNING_DEPLOYER_HOLDING {
            checks.push(SecurityCheck::warning(
                "deployer_holding",
                format!("Deployer holds {:.1}% of supply", holding * 100.0),
                5,
            ));
        }
    }

    if let Some(txs) = data.deployer_tx_last_7_days {
        if txs >= ACTIVE_DEPLOYER_TX {
            checks.push(SecurityCheck::warning(
                "deployer_activity",
                format!("Deployer wallet made {} transactions in the last 7 days", txs),
                5,
            ));
        }
    }
}

fn check_maturity(data: &TokenData, checks: &mut Vec<SecurityCheck>) {
    if let Some(age) = data.age_days {
        if age < 1.0 {
            checks.push(SecurityCheck::warning(
                "token_age",
                "Token was created less than a day ago",
                10,
            ));
        } else if age >= ESTABLISHED_AGE_DAYS {
            checks.push(SecurityCheck::info(
                "token_age",
                format!("Token has traded for {:.0} days", age),
                -5,
            ));
        }
    }

    if let Some(holders) = data.holder_count {
        if holders >= WIDE_HOLDER_BASE {
            checks.push(SecurityCheck::info(
                "holder_base",
                format!("Broad holder base of {} wallets", holders),
                -5,
            ));
        }
    }

    if let Some(market_cap) = data.market_cap {
        if market_cap >= LARGE_MARKET_CAP_USD {
            checks.push(SecurityCheck::info(
                "market_cap",
                format!("Large market capitalization of {}", format_usd(market_cap)),
                -5,
            ));
        }
    }
}
