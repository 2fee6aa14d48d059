use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::validator::ConfigValidator;
use crate::error::AppError;
use crate::risk::{BattleTestedConfig, EngineConfig};
use crate::utils::fault_tolerance::CircuitBreakerConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/token-risk.toml";
pub const ENV_PREFIX: &str = "TOKEN_RISK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub scoring: ScoringSettings,
    pub ai_service: AIServiceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub staleness_window_minutes: i64,
    pub battle_tested_market_cap_usd: f64,
    pub battle_tested_discount: f64,
    pub battle_tested_max_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIServiceSettings {
    /// Base URL of the generative explainer; unset means fallback only.
    #[serde(default)]
    pub url: Option<String>,
    pub timeout_seconds: u64,
    pub fallback_enabled: bool,
    pub failure_threshold: usize,
    pub reset_timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    /// json, pretty or compact
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            scoring: ScoringSettings::default(),
            ai_service: AIServiceSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        let battle_tested = BattleTestedConfig::default();
        ScoringSettings {
            staleness_window_minutes: 60,
            battle_tested_market_cap_usd: battle_tested.market_cap_threshold_usd,
            battle_tested_discount: battle_tested.discount,
            battle_tested_max_score: battle_tested.max_score,
        }
    }
}

impl Default for AIServiceSettings {
    fn default() -> Self {
        AIServiceSettings {
            url: None,
            timeout_seconds: 5,
            fallback_enabled: true,
            failure_threshold: 5,
            reset_timeout_seconds: 60,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Settings {
    /// Load from `.env`, `config/token-risk.toml` and `TOKEN_RISK__*` variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Layer defaults, an optional TOML file and environment variables, then validate.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let defaults = Settings::default();

        let config = Config::builder()
            .set_default("scoring.staleness_window_minutes", defaults.scoring.staleness_window_minutes)?
            .set_default("scoring.battle_tested_market_cap_usd", defaults.scoring.battle_tested_market_cap_usd)?
            .set_default("scoring.battle_tested_discount", defaults.scoring.battle_tested_discount)?
            .set_default("scoring.battle_tested_max_score", defaults.scoring.battle_tested_max_score as i64)?
            .set_default("ai_service.timeout_seconds", defaults.ai_service.timeout_seconds as i64)?
            .set_default("ai_service.fallback_enabled", defaults.ai_service.fallback_enabled)?
            .set_default("ai_service.failure_threshold", defaults.ai_service.failure_threshold as i64)?
            .set_default("ai_service.reset_timeout_seconds", defaults.ai_service.reset_timeout_seconds as i64)?
            .set_default("logging.level", defaults.logging.level.as_str())?
            .set_default("logging.format", defaults.logging.format.as_str())?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        ConfigValidator::new()
            .validate(&settings)
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        info!(
            path = %path.display(),
            explainer_configured = settings.ai_service.url.is_some(),
            "Configuration loaded"
        );
        Ok(settings)
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            staleness_window_minutes: self.scoring.staleness_window_minutes,
            battle_tested: BattleTestedConfig {
                market_cap_threshold_usd: self.scoring.battle_tested_market_cap_usd,
                discount: self.scoring.battle_tested_discount,
                max_score: self.scoring.battle_tested_max_score,
            },
        }
    }
}

impl AIServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn circuit_breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            reset_timeout: Duration::from_secs(self.reset_timeout_seconds),
            ..CircuitBreakerConfig::default()
        }
    }
}
