// Deterministic, template-driven risk explanations
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{FactorContribution, RiskExplanation, RiskLevel, RiskResult, TokenSummary};
use crate::utils::math::{decimal_to_score, format_usd};

const KEY_FACTOR_COUNT: usize = 3;
const KEY_FLAG_COUNT: usize = 3;

/// Render an explanation from the scoring output alone. No I/O.
///
/// `top_factors` should carry every factor contribution, largest first: the
/// calculation breakdown lists all of them so the weighted sum can be checked
/// against the numeric result, and the first few become key insights.
pub fn generate_explanation(
    token: &TokenSummary,
    top_factors: &[FactorContribution],
    risk_score: u8,
    risk_level: RiskLevel,
    red_flags: &[String],
) -> RiskExplanation {
    let name = token.display_name();

    let overview = format!(
        "{} on {} has a {} risk score of {}/100. {}",
        name,
        token.chain,
        risk_level,
        risk_score,
        level_summary(risk_level)
    );

    let mut key_insights: Vec<String> = top_factors
        .iter()
        .take(KEY_FACTOR_COUNT)
        .map(|c| {
            format!(
                "{} is a leading driver: sub-score {} with weight {} adds {} points",
                c.factor.label(),
                c.score,
                c.weight,
                c.contribution.round_dp(2)
            )
        })
        .collect();
    if red_flags.is_empty() {
        key_insights.push("No critical or warning-level security findings".to_string());
    } else {
        key_insights.extend(red_flags.iter().take(KEY_FLAG_COUNT).cloned());
    }

    let risk_analysis = if red_flags.is_empty() {
        format!(
            "The score comes from the weighted factor model alone. The largest contributor is {}.",
            top_factors
                .first()
                .map(|c| c.factor.label())
                .unwrap_or("none")
        )
    } else {
        format!(
            "{} security finding(s) need attention: {}.",
            red_flags.len(),
            red_flags.join("; ")
        )
    };

    let explanation = RiskExplanation {
        overview,
        key_insights,
        risk_analysis,
        recommendation: recommendation(risk_level).to_string(),
        technical_details: technical_details(token),
        calculation_breakdown: calculation_breakdown(top_factors, risk_score),
    };

    debug!(token = %token.address, risk_score, "Generated fallback explanation");
    explanation
}

fn level_summary(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Fundamentals and contract controls look healthy.",
        RiskLevel::Medium => "Some factors warrant caution before taking a position.",
        RiskLevel::High => "Several factors point to elevated risk of loss.",
        RiskLevel::Critical => "Severe risks were detected; losses are likely.",
    }
}

fn recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Suitable for standard position sizing. Keep monitoring liquidity and holder changes.",
        RiskLevel::Medium => "Use reduced position sizes and verify the flagged factors independently.",
        RiskLevel::High => "Only consider small, speculative positions with an exit plan.",
        RiskLevel::Critical => "Avoid interacting with this token.",
    }
}

fn technical_details(token: &TokenSummary) -> String {
    let mut parts = vec![format!("Chain: {}", token.chain), format!("Address: {}", token.address)];
    if let Some(market_cap) = token.market_cap {
        parts.push(format!("Market cap: {}", format_usd(market_cap)));
    }
    if let Some(liquidity) = token.liquidity_usd {
        parts.push(format!("Liquidity: {}", format_usd(liquidity)));
    }
    if let Some(holders) = token.holder_count {
        parts.push(format!("Holders: {}", holders));
    }
    if let Some(age) = token.age_days {
        parts.push(format!("Age: {:.0} days", age));
    }
    parts.join(". ")
}

fn calculation_breakdown(contributions: &[FactorContribution], risk_score: u8) -> String {
    let mut lines: Vec<String> = contributions
        .iter()
        .map(|c| format!("{}: {} x {} = {}", c.factor, c.score, c.weight, c.contribution))
        .collect();

    let weighted_sum: Decimal = contributions.iter().map(|c| c.contribution).sum();
    let base_score = decimal_to_score(weighted_sum);
    lines.push(format!("Weighted sum: {}", weighted_sum));
    lines.push(format!("Base score (rounded): {}", base_score));

    let adjustment = risk_score as i16 - base_score as i16;
    if adjustment == 0 {
        lines.push(format!("No overrides applied. Final score: {}", risk_score));
    } else {
        lines.push(format!("Override adjustment: {:+}. Final score: {}", adjustment, risk_score));
    }

    lines.join("\n")
}

/// Convenience wrapper that explains a finished [`RiskResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackExplainer;

impl FallbackExplainer {
    pub fn new() -> Self {
        Self
    }

    pub fn explain_result(&self, token: &TokenSummary, result: &RiskResult) -> RiskExplanation {
        let contributions: Vec<FactorContribution> = result
            .top_contributions(result.contributions.len())
            .into_iter()
            .cloned()
            .collect();

        let mut explanation = generate_explanation(
            token,
            &contributions,
            result.overall_risk_score,
            result.risk_level,
            &result.red_flags(),
        );

        if let Some(reason) = &result.override_reason {
            explanation.calculation_breakdown.push_str(&format!("\nOverride: {}", reason));
        }
        explanation
    }
}
