//! Public rating units and the internal Glicko-2 scale
//!
//! Public units are strength (centered on 1500), deviation (rating deviation,
//! half of the 95% interval width) and volatility. Every formula of the engine
//! works on the internal scale `(mu, phi, sigma)`; see Glickman, "Example of
//! the Glicko-2 system", steps 2 and 8.

use crate::error::{RatingError, Result};
use crate::utils::truncate_decimals;
use serde::{Deserialize, Serialize};

/// Ratio between public rating units and the internal Glicko-2 scale
pub const SCALE_FACTOR: f64 = 173.7178;

/// Strength of a brand new competitor, and the center of the scale
pub const INITIAL_STRENGTH: f64 = 1500.0;

/// Deviation of a brand new competitor. Also the ceiling no deviation may exceed.
pub const INITIAL_DEVIATION: f64 = 350.0;

/// Volatility used by Glickman's worked example
pub const DEFAULT_VOLATILITY: f64 = 0.06;

/// System constant used when none has been supplied
pub const DEFAULT_TAU: f64 = 0.5;

/// Deviation ceiling on the internal scale
pub const PHI_CEILING: f64 = INITIAL_DEVIATION / SCALE_FACTOR;

/// A competitor's rating in public units.
///
/// Immutable value: every update produces a new `Rating`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    strength: f64,
    deviation: f64,
    volatility: f64,
}

impl Rating {
    /// Create a rating from public units
    pub fn new(strength: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            strength,
            deviation,
            volatility,
        }
    }

    /// Create a rating, rejecting values that break the rating invariants
    pub fn try_new(strength: f64, deviation: f64, volatility: f64) -> Result<Self> {
        if !strength.is_finite() {
            return Err(RatingError::invalid_parameter(format!(
                "strength must be finite, got {}",
                strength
            )));
        }
        if !(deviation.is_finite() && deviation > 0.0) {
            return Err(RatingError::invalid_parameter(format!(
                "deviation must be positive, got {}",
                deviation
            )));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(RatingError::invalid_parameter(format!(
                "volatility must be positive, got {}",
                volatility
            )));
        }
        Ok(Self::new(strength, deviation, volatility))
    }

    /// Starting rating for a new competitor with the given volatility
    pub fn default_with_volatility(volatility: f64) -> Self {
        Self::new(INITIAL_STRENGTH, INITIAL_DEVIATION, volatility)
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Convert to the internal Glicko-2 scale
    pub fn to_scale(&self) -> ScaledRating {
        ScaledRating {
            mu: (self.strength - INITIAL_STRENGTH) / SCALE_FACTOR,
            phi: self.deviation / SCALE_FACTOR,
            sigma: self.volatility,
        }
    }

    /// Display form: strength and deviation truncated to 2 decimals,
    /// volatility to 6
    pub fn truncated(&self) -> Self {
        Self {
            strength: truncate_decimals(self.strength, 2),
            deviation: truncate_decimals(self.deviation, 2),
            volatility: truncate_decimals(self.volatility, 6),
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::default_with_volatility(DEFAULT_VOLATILITY)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self.truncated();
        write!(
            f,
            "{:.2} ±{:.2} (v={:.6})",
            shown.strength, shown.deviation, shown.volatility
        )
    }
}

/// A rating on the internal Glicko-2 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledRating {
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
}

impl ScaledRating {
    pub fn new(mu: f64, phi: f64, sigma: f64) -> Self {
        Self { mu, phi, sigma }
    }

    /// Convert back to public units
    pub fn to_rating(&self) -> Rating {
        Rating::new(
            self.mu * SCALE_FACTOR + INITIAL_STRENGTH,
            self.phi * SCALE_FACTOR,
            self.sigma,
        )
    }
}

impl From<Rating> for ScaledRating {
    fn from(rating: Rating) -> Self {
        rating.to_scale()
    }
}

impl From<ScaledRating> for Rating {
    fn from(scaled: ScaledRating) -> Self {
        scaled.to_rating()
    }
}

/// Volatility that relaxes a seasoned deviation back to the ceiling after
/// `periods` idle rating periods.
///
/// A non-positive `periods` means the deviation should reset immediately, so
/// it is treated as a zero deviation returning within one period.
pub fn initial_volatility(seasoned_deviation: f64, periods: f64) -> f64 {
    if periods <= 0.0 {
        return initial_volatility(0.0, 1.0);
    }
    let seasoned_phi = seasoned_deviation / SCALE_FACTOR;
    truncate_decimals(
        ((PHI_CEILING.powi(2) - seasoned_phi.powi(2)) / periods).sqrt(),
        6,
    )
}
