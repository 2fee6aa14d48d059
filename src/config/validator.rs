use thiserror::Error;
use url::Url;

use crate::config::settings::Settings;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid range: {field} must be between {min} and {max}, got {value}")]
    InvalidRange { field: String, min: f64, max: f64, value: f64 },
    #[error("Invalid format: {field} - {message}")]
    InvalidFormat { field: String, message: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Sanity checks over loaded settings
#[derive(Debug, Clone, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, settings: &Settings) -> ValidationResult<()> {
        let scoring = &settings.scoring;
        check_range(
            "scoring.staleness_window_minutes",
            scoring.staleness_window_minutes as f64,
            1.0,
            10_080.0,
        )?;
        check_range(
            "scoring.battle_tested_discount",
            scoring.battle_tested_discount,
            0.0,
            1.0,
        )?;
        check_range(
            "scoring.battle_tested_max_score",
            scoring.battle_tested_max_score as f64,
            0.0,
            100.0,
        )?;
        if !scoring.battle_tested_market_cap_usd.is_finite() || scoring.battle_tested_market_cap_usd <= 0.0 {
            return Err(ValidationError::InvalidFormat {
                field: "scoring.battle_tested_market_cap_usd".to_string(),
                message: "must be a positive amount".to_string(),
            });
        }

        let ai = &settings.ai_service;
        if let Some(url) = &ai.url {
            self.validate_url(url)?;
        }
        check_range("ai_service.timeout_seconds", ai.timeout_seconds as f64, 1.0, 300.0)?;
        check_range("ai_service.failure_threshold", ai.failure_threshold as f64, 1.0, 1_000.0)?;

        let format = settings.logging.format.to_lowercase();
        if !LOG_FORMATS.contains(&format.as_str()) {
            return Err(ValidationError::InvalidFormat {
                field: "logging.format".to_string(),
                message: format!("expected one of {:?}, got '{}'", LOG_FORMATS, settings.logging.format),
            });
        }
        let level = settings.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ValidationError::InvalidFormat {
                field: "logging.level".to_string(),
                message: format!("expected one of {:?}, got '{}'", LOG_LEVELS, settings.logging.level),
            });
        }

        Ok(())
    }

    /// Explainer URLs must be absolute http(s) URLs.
    pub fn validate_url(&self, raw: &str) -> ValidationResult<Url> {
        let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ValidationError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                raw, other
            ))),
        }
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::InvalidRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}
