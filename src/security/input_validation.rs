use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{ChainType, TokenData};
use crate::risk::RiskError;

/// Unit a provider reports a share or rate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PercentUnit {
    /// 0.0 - 1.0
    #[default]
    Fraction,
    /// 0 - 100
    Percent,
}

impl PercentUnit {
    pub fn to_fraction(&self, value: f64) -> f64 {
        match self {
            PercentUnit::Fraction => value,
            PercentUnit::Percent => value / 100.0,
        }
    }

    pub fn to_percent(&self, value: f64) -> f64 {
        match self {
            PercentUnit::Fraction => value * 100.0,
            PercentUnit::Percent => value,
        }
    }
}

/// Units declared by the data provider for share-like fields.
///
/// The engine works in fractions for holder shares and percent for taxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUnits {
    pub holder_shares: PercentUnit,
    pub taxes: PercentUnit,
}

impl Default for ProviderUnits {
    fn default() -> Self {
        Self {
            holder_shares: PercentUnit::Fraction,
            taxes: PercentUnit::Percent,
        }
    }
}

/// Rewrite share and tax fields into the engine's canonical units.
pub fn canonicalize_units(data: &mut TokenData, units: ProviderUnits) {
    data.top10_holders_pct = data.top10_holders_pct.map(|v| units.holder_shares.to_fraction(v));
    data.deployer_holding_pct = data.deployer_holding_pct.map(|v| units.holder_shares.to_fraction(v));
    data.buy_tax_pct = data.buy_tax_pct.map(|v| units.taxes.to_percent(v));
    data.sell_tax_pct = data.sell_tax_pct.map(|v| units.taxes.to_percent(v));
}

/// Structural validation of a token snapshot before scoring
#[derive(Debug, Clone)]
pub struct TokenDataValidator {
    evm_address_regex: Regex,
    solana_address_regex: Regex,
    cardano_asset_regex: Regex,
    max_string_length: usize,
}

impl TokenDataValidator {
    pub fn new() -> Result<Self, RiskError> {
        Ok(Self {
            evm_address_regex: compile(r"^0x[a-fA-F0-9]{40}$")?,
            solana_address_regex: compile(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$")?,
            cardano_asset_regex: compile(r"^([a-fA-F0-9]{56}\.?[a-fA-F0-9]{0,64}|asset1[02-9ac-hj-np-z]{38})$")?,
            max_string_length: 256,
        })
    }

    /// Validate address format for the token's chain family
    pub fn validate_address(&self, address: &str, chain: ChainType) -> Result<(), RiskError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(RiskError::validation("address", "must not be empty"));
        }
        if trimmed.len() > self.max_string_length {
            return Err(RiskError::validation(
                "address",
                format!("longer than {} characters", self.max_string_length),
            ));
        }

        let matches = match chain {
            ChainType::Evm => self.evm_address_regex.is_match(trimmed),
            ChainType::Solana => self.solana_address_regex.is_match(trimmed),
            ChainType::Cardano => self.cardano_asset_regex.is_match(trimmed),
            ChainType::Other => true,
        };

        if matches {
            Ok(())
        } else {
            Err(RiskError::validation(
                "address",
                format!("'{}' is not a valid {} address", trimmed, chain),
            ))
        }
    }

    /// Validate a token snapshot and return the sanitized copy that will be scored.
    pub fn validate(&self, data: &TokenData) -> Result<TokenData, RiskError> {
        self.validate_address(&data.address, data.chain)?;

        for (field, value) in [
            ("marketCap", data.market_cap),
            ("fullyDilutedValue", data.fully_diluted_value),
            ("liquidityUsd", data.liquidity_usd),
            ("volume24h", data.volume_24h),
            ("price", data.price),
            ("totalSupply", data.total_supply),
            ("circulatingSupply", data.circulating_supply),
            ("maxSupply", data.max_supply),
            ("burnedSupply", data.burned_supply),
            ("ageDays", data.age_days),
        ] {
            validate_non_negative(field, value)?;
        }

        validate_fraction("top10HoldersPct", data.top10_holders_pct)?;
        validate_fraction("deployerHoldingPct", data.deployer_holding_pct)?;
        validate_tax("buyTaxPct", data.buy_tax_pct)?;
        validate_tax("sellTaxPct", data.sell_tax_pct)?;

        let mut sanitized = data.clone();
        sanitized.address = data.address.trim().to_string();

        if let (Some(total), Some(circulating)) = (data.total_supply, data.circulating_supply) {
            if circulating > total {
                warn!(
                    token = %sanitized.address,
                    total_supply = total,
                    circulating_supply = circulating,
                    "Circulating supply exceeds total supply, clamping to total"
                );
                sanitized.circulating_supply = Some(total);
            }
        }

        Ok(sanitized)
    }
}

fn compile(pattern: &str) -> Result<Regex, RiskError> {
    Regex::new(pattern).map_err(|e| RiskError::ConfigurationError {
        message: format!("invalid address pattern: {}", e),
    })
}

fn validate_non_negative(field: &str, value: Option<f64>) -> Result<(), RiskError> {
    match value {
        Some(v) if !v.is_finite() => Err(RiskError::validation(field, "must be a finite number")),
        Some(v) if v < 0.0 => Err(RiskError::validation(field, format!("cannot be negative (got {})", v))),
        _ => Ok(()),
    }
}

fn validate_fraction(field: &str, value: Option<f64>) -> Result<(), RiskError> {
    validate_non_negative(field, value)?;
    match value {
        Some(v) if v > 1.0 => Err(RiskError::validation(
            field,
            format!("must be a fraction between 0 and 1 (got {})", v),
        )),
        _ => Ok(()),
    }
}

fn validate_tax(field: &str, value: Option<f64>) -> Result<(), RiskError> {
    validate_non_negative(field, value)?;
    match value {
        Some(v) if v > 100.0 => Err(RiskError::validation(
            field,
            format!("cannot exceed 100% (got {})", v),
        )),
        _ => Ok(()),
    }
}
