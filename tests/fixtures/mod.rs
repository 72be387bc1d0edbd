//! Shared helpers for integration testing
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use glicko_period::competitor::Player;
use glicko_period::config::RatingConfig;
use glicko_period::rating::Rating;

/// Route engine logs to the test harness; repeated calls are harmless
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap()
}

/// Time `hours` into week `week` (zero-based) after the base time
pub fn week_time(week: i64, hours: i64) -> DateTime<Utc> {
    base_time() + Duration::weeks(week) + Duration::hours(hours)
}

pub fn weekly_config() -> RatingConfig {
    RatingConfig::default()
}

pub fn create_test_player(name: &str, strength: f64, deviation: f64) -> Player {
    Player::new(name, Rating::new(strength, deviation, 0.06), base_time())
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}
