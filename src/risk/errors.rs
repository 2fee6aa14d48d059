// Risk engine error types
use thiserror::Error;

/// Errors raised before scoring begins. Scoring itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Invalid value for field `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl RiskError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        RiskError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            RiskError::Validation { field, .. } => Some(field),
            RiskError::ConfigurationError { .. } => None,
        }
    }
}
