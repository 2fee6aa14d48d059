pub mod config;
pub mod error;
pub mod models;
pub mod risk;
pub mod security;
pub mod services;
pub mod utils;

pub use error::types::*;
pub use models::{ChainType, RiskLevel, RiskResult, TokenData};
pub use risk::{EngineConfig, RiskEngine, RiskError};
pub use services::{ExplanationService, FallbackExplainer};
