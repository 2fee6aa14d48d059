// Confidence and data-tier assessment
use serde::Serialize;

use crate::models::{DataTier, FactorQuality, FactorScore};

/// Confidence ceiling when no contract-level security provider answered.
pub const NO_SECURITY_DATA_CONFIDENCE_CAP: u8 = 70;

const FULL_TIER_FACTOR_SHARE: f64 = 0.8;
const PARTIAL_TIER_MIN_CONFIDENCE: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfidenceAssessment {
    pub confidence: u8,
    pub tier: DataTier,
}

/// Derive confidence (0-100) and the data tier from factor quality.
///
/// Each FULL factor counts fully, PARTIAL half, ESTIMATED a quarter and
/// MISSING nothing. Without detailed security data confidence never exceeds 70
/// and the tier can never be FULL.
pub fn assess_confidence(factor_scores: &[FactorScore], has_detailed_security_data: bool) -> ConfidenceAssessment {
    if factor_scores.is_empty() {
        return ConfidenceAssessment {
            confidence: 0,
            tier: DataTier::Minimal,
        };
    }

    let count = factor_scores.len() as f64;
    let weighted: f64 = factor_scores.iter().map(|f| f.quality.confidence_weight()).sum();
    let mut confidence = (100.0 * weighted / count).round().clamp(0.0, 100.0) as u8;

    if !has_detailed_security_data {
        confidence = confidence.min(NO_SECURITY_DATA_CONFIDENCE_CAP);
    }

    let full_share = factor_scores
        .iter()
        .filter(|f| f.quality == FactorQuality::Full)
        .count() as f64
        / count;

    let tier = if full_share >= FULL_TIER_FACTOR_SHARE && has_detailed_security_data {
        DataTier::Full
    } else if confidence >= PARTIAL_TIER_MIN_CONFIDENCE {
        DataTier::Partial
    } else {
        DataTier::Minimal
    };

    ConfidenceAssessment { confidence, tier }
}
