use chrono::{DateTime, Duration, Utc};

/// Linear freshness in `[0, 1]`: 1.0 at age 0, 0.0 once the age reaches `window`.
///
/// Timestamps in the future count as perfectly fresh. A non-positive window
/// treats any past data as stale.
pub fn data_freshness(timestamp: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> f64 {
    let age = now - timestamp;
    if age <= Duration::zero() {
        return 1.0;
    }
    if window <= Duration::zero() {
        return 0.0;
    }
    let ratio = age.num_milliseconds() as f64 / window.num_milliseconds() as f64;
    (1.0 - ratio).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_decays_linearly() {
        let now = Utc::now();
        let window = Duration::minutes(60);
        assert_eq!(data_freshness(now, now, window), 1.0);
        let half = data_freshness(now - Duration::minutes(30), now, window);
        assert!((half - 0.5).abs() < 1e-9);
        assert_eq!(data_freshness(now - Duration::minutes(90), now, window), 0.0);
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let now = Utc::now();
        assert_eq!(data_freshness(now + Duration::minutes(5), now, Duration::minutes(60)), 1.0);
    }
}
