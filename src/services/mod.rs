pub mod ai_client;
pub mod explanation_service;
pub mod fallback_explainer;

pub use ai_client::{AiExplainerClient, RiskExplainer};
pub use explanation_service::{ExplanationService, DEFAULT_EXPLAINER_TIMEOUT};
pub use fallback_explainer::{generate_explanation, FallbackExplainer};
