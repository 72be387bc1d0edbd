//! Utility functions for the rating engine

use crate::error::{RatingError, Result};
use chrono::{DateTime, Duration, DurationRound, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Truncate (not round) `value` to `places` decimal places
pub fn truncate_decimals(value: f64, places: i32) -> f64 {
    let shift = 10f64.powi(places);
    (value * shift).trunc() / shift
}

/// Truncate a timestamp down to the start of its rating period
pub fn truncate_to_period(at: DateTime<Utc>, period: Duration) -> Result<DateTime<Utc>> {
    if period <= Duration::zero() {
        return Err(RatingError::invalid_parameter(
            "rating period must be positive",
        ));
    }
    at.duration_trunc(period).map_err(|e| {
        RatingError::invalid_parameter(format!("cannot truncate {} to period: {}", at, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_decimals() {
        assert_eq!(truncate_decimals(1464.0507, 2), 1464.05);
        assert_eq!(truncate_decimals(151.5199, 2), 151.51);
        assert_eq!(truncate_decimals(0.0599967, 6), 0.059996);
        assert_eq!(truncate_decimals(-1.239, 2), -1.23);
    }

    #[test]
    fn test_truncate_to_period() {
        let at = Utc.with_ymd_and_hms(2019, 5, 1, 13, 45, 10).unwrap();
        let day = truncate_to_period(at, Duration::days(1)).unwrap();
        assert_eq!(day, Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap());

        let hour = truncate_to_period(at, Duration::hours(1)).unwrap();
        assert_eq!(hour, Utc.with_ymd_and_hms(2019, 5, 1, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_truncate_to_period_rejects_zero() {
        let at = current_timestamp();
        assert!(truncate_to_period(at, Duration::zero()).is_err());
    }
}
