use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse blockchain family. Drives weight selection and which
/// chain-specific security checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChainType {
    Evm,
    Solana,
    Cardano,
    Other,
}

impl ChainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainType::Evm => "EVM",
            ChainType::Solana => "SOLANA",
            ChainType::Cardano => "CARDANO",
            ChainType::Other => "OTHER",
        }
    }

    /// Map a provider chain identifier ("ethereum", "1", "solana", ...) to a family.
    pub fn from_chain_id(chain_id: &str) -> Self {
        match chain_id.trim().to_lowercase().as_str() {
            "1" | "ethereum" | "eth" | "56" | "bsc" | "137" | "polygon" | "42161" | "arbitrum"
            | "10" | "optimism" | "8453" | "base" | "43114" | "avalanche" => ChainType::Evm,
            "solana" | "sol" | "solana-mainnet" => ChainType::Solana,
            "cardano" | "ada" | "cardano-mainnet" => ChainType::Cardano,
            _ => ChainType::Other,
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
