use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ChainType;

/// Provider-agnostic token snapshot handed over by the data-acquisition layer.
///
/// Units are fixed per field:
/// - USD amounts (`market_cap`, `liquidity_usd`, ...) are plain dollars.
/// - `top10_holders_pct` and `deployer_holding_pct` are fractions in `[0, 1]`.
/// - `buy_tax_pct` and `sell_tax_pct` are percentages in `[0, 100]`.
///
/// `None` always means "unknown", except for `max_supply` where `None` means
/// the supply is uncapped. Unrecognised keys are rejected so a misspelled
/// field never silently reads as missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenData {
    pub address: String,
    pub chain: ChainType,
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,

    // Market
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub fully_diluted_value: Option<f64>,
    #[serde(default, alias = "liquidityUSD")]
    pub liquidity_usd: Option<f64>,
    #[serde(default, rename = "volume24h")]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,

    // Supply
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub burned_supply: Option<f64>,

    // Holders
    #[serde(default)]
    pub holder_count: Option<u64>,
    #[serde(default, rename = "top10HoldersPct", alias = "top10HoldersPercentage")]
    pub top10_holders_pct: Option<f64>,

    // Activity
    #[serde(default, rename = "txCount24h")]
    pub tx_count_24h: Option<u64>,
    #[serde(default)]
    pub age_days: Option<f64>,

    // Security findings
    #[serde(default)]
    pub is_honeypot: Option<bool>,
    #[serde(default)]
    pub is_mintable: Option<bool>,
    #[serde(default)]
    pub has_freeze_authority: Option<bool>,
    #[serde(default)]
    pub owner_renounced: Option<bool>,
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default)]
    pub buy_tax_pct: Option<f64>,
    #[serde(default)]
    pub sell_tax_pct: Option<f64>,
    #[serde(default)]
    pub is_open_source: Option<bool>,
    #[serde(default)]
    pub is_proxy: Option<bool>,
    #[serde(default)]
    pub liquidity_locked: Option<bool>,
    #[serde(default)]
    pub deployer_holding_pct: Option<f64>,
    #[serde(default, rename = "deployerTxLast7Days")]
    pub deployer_tx_last_7_days: Option<u64>,

    #[serde(default)]
    pub has_detailed_security_data: bool,
    pub data_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub data_sources: Vec<String>,
}

impl TokenData {
    /// Snapshot with identifiers only; every optional field unknown.
    pub fn new(address: impl Into<String>, chain: ChainType, data_timestamp: DateTime<Utc>) -> Self {
        Self {
            address: address.into(),
            chain,
            chain_id: None,
            symbol: None,
            name: None,
            market_cap: None,
            fully_diluted_value: None,
            liquidity_usd: None,
            volume_24h: None,
            price: None,
            total_supply: None,
            circulating_supply: None,
            max_supply: None,
            burned_supply: None,
            holder_count: None,
            top10_holders_pct: None,
            tx_count_24h: None,
            age_days: None,
            is_honeypot: None,
            is_mintable: None,
            has_freeze_authority: None,
            owner_renounced: None,
            owner_address: None,
            buy_tax_pct: None,
            sell_tax_pct: None,
            is_open_source: None,
            is_proxy: None,
            liquidity_locked: None,
            deployer_holding_pct: None,
            deployer_tx_last_7_days: None,
            has_detailed_security_data: false,
            data_timestamp,
            data_sources: Vec::new(),
        }
    }

    /// Short label used in logs and explanations.
    pub fn display_name(&self) -> String {
        match (&self.symbol, &self.name) {
            (Some(symbol), Some(name)) => format!("{} ({})", name, symbol),
            (Some(symbol), None) => symbol.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => self.address.clone(),
        }
    }

    pub fn is_supply_uncapped(&self) -> bool {
        self.max_supply.is_none()
    }

    /// Share of total supply not yet circulating, if both are known.
    pub fn locked_supply_ratio(&self) -> Option<f64> {
        match (self.total_supply, self.circulating_supply) {
            (Some(total), Some(circulating)) if total > 0.0 => {
                Some(((total - circulating) / total).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }

    pub fn is_active_honeypot(&self) -> bool {
        self.is_honeypot == Some(true)
    }
}
