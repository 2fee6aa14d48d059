use std::fmt;

use crate::risk::RiskError;

#[derive(Debug, Clone)]
pub enum AppError {
    ConfigError(String),
    ValidationError(String),
    ExternalServiceError(String),
    TimeoutError(String),
    CircuitOpen(String),
    IoError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ExternalServiceError(msg) => write!(f, "External service error: {}", msg),
            AppError::TimeoutError(msg) => write!(f, "Timeout: {}", msg),
            AppError::CircuitOpen(service) => write!(f, "Circuit breaker open for service: {}", service),
            AppError::IoError(msg) => write!(f, "I/O error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<RiskError> for AppError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::Validation { .. } => AppError::ValidationError(err.to_string()),
            RiskError::ConfigurationError { message } => AppError::ConfigError(message),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::TimeoutError(format!("HTTP request timed out: {}", err))
        } else {
            AppError::ExternalServiceError(format!("HTTP request error: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}
