use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::AIServiceSettings;
use crate::error::AppError;
use crate::models::{
    ExplanationOutcome, ExplanationRequest, ExplanationSource, RiskResult, TokenSummary,
};
use crate::services::ai_client::{AiExplainerClient, RiskExplainer};
use crate::services::fallback_explainer::FallbackExplainer;
use crate::utils::fault_tolerance::{CircuitBreakerConfig, ServiceCircuitBreaker};

pub const DEFAULT_EXPLAINER_TIMEOUT: Duration = Duration::from_secs(5);

/// Produces an explanation for every result, preferring the generative
/// explainer and falling back to the template generator on any failure.
pub struct ExplanationService {
    explainer: Option<Arc<dyn RiskExplainer>>,
    circuit_breaker: ServiceCircuitBreaker,
    timeout: Duration,
    fallback_enabled: bool,
    fallback: FallbackExplainer,
}

impl ExplanationService {
    pub fn new(
        explainer: Option<Arc<dyn RiskExplainer>>,
        timeout: Duration,
        circuit_breaker_config: CircuitBreakerConfig,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            explainer,
            circuit_breaker: ServiceCircuitBreaker::with_config("risk_explainer", circuit_breaker_config),
            timeout,
            fallback_enabled,
            fallback: FallbackExplainer::new(),
        }
    }

    /// Template explanations only.
    pub fn fallback_only() -> Self {
        Self::new(None, DEFAULT_EXPLAINER_TIMEOUT, CircuitBreakerConfig::default(), true)
    }

    /// Build from settings, wiring the HTTP explainer when a URL is configured.
    pub fn from_settings(settings: &AIServiceSettings) -> Result<Self, AppError> {
        let explainer: Option<Arc<dyn RiskExplainer>> = match &settings.url {
            Some(url) => Some(Arc::new(AiExplainerClient::new(url.clone(), settings.timeout())?)),
            None => None,
        };

        Ok(Self::new(
            explainer,
            settings.timeout(),
            settings.circuit_breaker_config(),
            settings.fallback_enabled,
        ))
    }

    pub fn has_explainer(&self) -> bool {
        self.explainer.is_some()
    }

    pub fn circuit_breaker(&self) -> &ServiceCircuitBreaker {
        &self.circuit_breaker
    }

    /// Explain a result. Never fails; reports which path produced the text.
    pub async fn explain(&self, token: &TokenSummary, result: &RiskResult) -> ExplanationOutcome {
        if let Some(explainer) = &self.explainer {
            match self.try_generative(explainer.as_ref(), token, result).await {
                Ok(explanation) => {
                    info!(
                        token = %result.token_address,
                        explainer = explainer.name(),
                        "Generated explanation"
                    );
                    metrics::increment_counter!("token_risk_explanations_total", "source" => "generative");
                    return ExplanationOutcome {
                        explanation,
                        source: ExplanationSource::Generative,
                    };
                }
                Err(e) if self.fallback_enabled => {
                    warn!(token = %result.token_address, error = %e, "Explainer failed, using fallback explanation");
                }
                Err(e) => {
                    error!(
                        token = %result.token_address,
                        error = %e,
                        "Explainer failed and fallback is disabled; returning fallback explanation anyway"
                    );
                }
            }
        }

        metrics::increment_counter!("token_risk_explanations_total", "source" => "fallback");
        ExplanationOutcome {
            explanation: self.fallback.explain_result(token, result),
            source: ExplanationSource::Fallback,
        }
    }

    async fn try_generative(
        &self,
        explainer: &dyn RiskExplainer,
        token: &TokenSummary,
        result: &RiskResult,
    ) -> Result<crate::models::RiskExplanation, AppError> {
        let request = ExplanationRequest::from_result(token.clone(), result);
        let timeout = self.timeout;

        self.circuit_breaker
            .call(|| async {
                match tokio::time::timeout(timeout, explainer.explain(&request)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(AppError::TimeoutError(format!(
                        "{} did not respond within {:?}",
                        explainer.name(),
                        timeout
                    ))),
                }
            })
            .await
    }
}
