use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::AppError;
use crate::models::{ExplanationRequest, RiskExplanation};

/// A generative explainer the caller may plug in front of the fallback.
#[async_trait]
pub trait RiskExplainer: Send + Sync {
    fn name(&self) -> &str;

    async fn explain(&self, request: &ExplanationRequest) -> Result<RiskExplanation, AppError>;
}

/// Client for an HTTP explanation service
#[derive(Clone)]
pub struct AiExplainerClient {
    client: Client,
    base_url: String,
}

impl AiExplainerClient {
    /// Create a new client. `timeout` bounds every request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the explanation service is healthy
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let url = format!("{}/health", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("Explanation service health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl RiskExplainer for AiExplainerClient {
    fn name(&self) -> &str {
        "ai_explainer"
    }

    async fn explain(&self, request: &ExplanationRequest) -> Result<RiskExplanation, AppError> {
        let url = format!("{}/explain", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(AppError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalServiceError(format!(
                "Explanation service returned {}: {}",
                status, error_text
            )));
        }

        response
            .json::<RiskExplanation>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to parse explanation: {}", e)))
    }
}
