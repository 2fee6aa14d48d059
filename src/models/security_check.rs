use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckSeverity {
    Critical,
    Warning,
    Info,
}

impl CheckSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckSeverity::Critical => "CRITICAL",
            CheckSeverity::Warning => "WARNING",
            CheckSeverity::Info => "INFO",
        }
    }
}

/// Discrete security finding, independent of the continuous factor scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityCheck {
    pub name: String,
    pub severity: CheckSeverity,
    pub message: String,
    /// Signed nudge the finding suggests (positive = riskier). Informational only.
    pub score_hint: i32,
}

impl SecurityCheck {
    pub fn critical(name: &str, message: impl Into<String>, score_hint: i32) -> Self {
        Self::new(name, CheckSeverity::Critical, message, score_hint)
    }

    pub fn warning(name: &str, message: impl Into<String>, score_hint: i32) -> Self {
        Self::new(name, CheckSeverity::Warning, message, score_hint)
    }

    pub fn info(name: &str, message: impl Into<String>, score_hint: i32) -> Self {
        Self::new(name, CheckSeverity::Info, message, score_hint)
    }

    fn new(name: &str, severity: CheckSeverity, message: impl Into<String>, score_hint: i32) -> Self {
        Self {
            name: name.to_string(),
            severity,
            message: message.into(),
            score_hint,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == CheckSeverity::Critical
    }
}
