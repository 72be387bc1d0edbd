//! Rating system configuration
//!
//! Loaded from environment variables or TOML, with defaults for every value.

use crate::rating::scale::{initial_volatility, DEFAULT_TAU, INITIAL_DEVIATION};
use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

/// Seconds in one day
pub const PERIOD_DAY: u64 = 24 * 60 * 60;
/// Seconds in one week
pub const PERIOD_WEEK: u64 = 7 * PERIOD_DAY;
/// Seconds in a 30-day month
pub const PERIOD_MONTH: u64 = 30 * PERIOD_DAY;
/// Seconds in a 365-day year
pub const PERIOD_YEAR: u64 = 365 * PERIOD_DAY;

/// Rating system parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Length of a rating period in seconds. Matches within one period are
    /// treated as simultaneous; a period with about 15 games each works well.
    pub rating_period_seconds: u64,
    /// Idle time after which an established competitor's deviation has
    /// relaxed back to the initial deviation
    pub reset_deviation_seconds: u64,
    /// System constant constraining volatility change (0.3 to 1.2 is typical)
    pub tau: f64,
    /// Deviation of an established competitor, used to derive the initial
    /// volatility
    pub seasoned_deviation: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            rating_period_seconds: PERIOD_WEEK,
            reset_deviation_seconds: PERIOD_YEAR,
            tau: DEFAULT_TAU,
            seasoned_deviation: 50.0,
        }
    }
}

impl RatingConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(period) = env::var("RATING_PERIOD_SECONDS") {
            config.rating_period_seconds = period
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_PERIOD_SECONDS value: {}", period))?;
        }
        if let Ok(reset) = env::var("RESET_DEVIATION_SECONDS") {
            config.reset_deviation_seconds = reset
                .parse()
                .map_err(|_| anyhow!("Invalid RESET_DEVIATION_SECONDS value: {}", reset))?;
        }
        if let Ok(tau) = env::var("RATING_TAU") {
            config.tau = tau
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_TAU value: {}", tau))?;
        }
        if let Ok(deviation) = env::var("SEASONED_DEVIATION") {
            config.seasoned_deviation = deviation
                .parse()
                .map_err(|_| anyhow!("Invalid SEASONED_DEVIATION value: {}", deviation))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from a TOML document; missing keys take defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Invalid rating configuration")?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Get the rating period as a Duration
    pub fn rating_period(&self) -> Duration {
        Duration::seconds(self.rating_period_seconds as i64)
    }

    /// Get the deviation reset period as a Duration
    pub fn reset_deviation_period(&self) -> Duration {
        Duration::seconds(self.reset_deviation_seconds as i64)
    }

    /// Number of rating periods in the deviation reset period
    pub fn periods_to_reset(&self) -> f64 {
        self.reset_deviation_seconds as f64 / self.rating_period_seconds as f64
    }

    /// Volatility for new competitors
    pub fn initial_volatility(&self) -> f64 {
        initial_volatility(self.seasoned_deviation, self.periods_to_reset())
    }
}

/// Validate configuration values
pub fn validate_config(config: &RatingConfig) -> Result<()> {
    if config.rating_period_seconds == 0 {
        return Err(anyhow!("Rating period must be greater than 0"));
    }
    if config.rating_period_seconds > i64::MAX as u64 / 1000 {
        return Err(anyhow!(
            "Rating period is too long: {} seconds",
            config.rating_period_seconds
        ));
    }
    if config.reset_deviation_seconds < config.rating_period_seconds {
        return Err(anyhow!(
            "Deviation reset period must be at least one rating period"
        ));
    }
    if config.reset_deviation_seconds > i64::MAX as u64 / 1000 {
        return Err(anyhow!(
            "Deviation reset period is too long: {} seconds",
            config.reset_deviation_seconds
        ));
    }
    if !(config.tau.is_finite() && config.tau > 0.0) {
        return Err(anyhow!("Tau must be positive, got {}", config.tau));
    }
    if !(0.0..INITIAL_DEVIATION).contains(&config.seasoned_deviation) {
        return Err(anyhow!(
            "Seasoned deviation must be within 0 to {}, got {}",
            INITIAL_DEVIATION,
            config.seasoned_deviation
        ));
    }

    Ok(())
}
