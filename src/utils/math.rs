use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Linear interpolation of `x` from `[x0, x1]` onto `[y0, y1]`, clamped to the segment.
pub fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if (x1 - x0).abs() < f64::EPSILON {
        return y0;
    }
    let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    y0 + (y1 - y0) * t
}

/// Interpolate on a log10 scale between two positive anchors.
///
/// Values at or below `x0` map to `y0`, at or above `x1` to `y1`.
pub fn log_interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if x <= x0 || x <= 0.0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    lerp(x.log10(), x0.log10(), x1.log10(), y0, y1)
}

/// Round half away from zero to an integer in `[0, 100]`.
pub fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Convert an f64 score to a 2-decimal `Decimal` (0 for non-finite input).
pub fn score_to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a decimal score to the nearest integer and clamp to `[0, 100]`.
pub fn decimal_to_score(value: Decimal) -> u8 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
        .clamp(0, 100) as u8
}

/// Format a USD amount compactly ($2.34B, $18.90M, $2.0K).
pub fn format_usd(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}
