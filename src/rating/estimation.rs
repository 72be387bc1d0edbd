//! Online accumulation of match evidence within a rating period
//!
//! `EstimationState` keeps the sufficient statistics of the open period
//! (accuracy = v⁻¹ and improvement = delta) so results can be fed one at a
//! time without storing the match history. `fix` closes the period.
//!
//! A state is a plain owned value: callers sharing one across threads must
//! serialize `apply_match`/`fix` on it themselves.

use crate::error::{RatingError, Result};
use crate::rating::estimator::{expected_score, g};
use crate::rating::scale::{Rating, ScaledRating, DEFAULT_TAU, PHI_CEILING};
use crate::rating::solver::{solvable, VolatilitySolver};
use crate::types::{is_valid_score, SCORE_DRAW, SCORE_LOSS, SCORE_WIN};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One result against a known opponent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Opponent's rating at match time
    pub opponent: Rating,
    /// Score within [0, 1]; graded outcomes are allowed
    pub score: f64,
}

impl MatchResult {
    pub fn new(opponent: Rating, score: f64) -> Self {
        Self { opponent, score }
    }

    pub fn win(opponent: Rating) -> Self {
        Self::new(opponent, SCORE_WIN)
    }

    pub fn loss(opponent: Rating) -> Self {
        Self::new(opponent, SCORE_LOSS)
    }

    pub fn draw(opponent: Rating) -> Self {
        Self::new(opponent, SCORE_DRAW)
    }
}

/// Running estimate for one competitor during the open rating period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationState {
    /// Sum of g²·E·(1 - E) over this period's matches (v⁻¹)
    accuracy: f64,
    /// Accuracy-weighted mean of the score residuals (delta)
    improvement: f64,
    /// Rating at the last period close
    fixed: ScaledRating,
    /// System constant of the most recent close
    tau: f64,
}

impl EstimationState {
    /// Start accumulating from `rating`
    pub fn new(rating: Rating) -> Self {
        Self {
            accuracy: 0.0,
            improvement: 0.0,
            fixed: rating.to_scale(),
            tau: DEFAULT_TAU,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn improvement(&self) -> f64 {
        self.improvement
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Whether a match has been applied since the last close
    pub fn has_pending(&self) -> bool {
        self.accuracy > 0.0
    }

    /// Rating fixed at the last period close
    pub fn rating(&self) -> Rating {
        self.fixed.to_rating()
    }

    /// Rating fixed at the last period close, on the internal scale
    pub fn scaled(&self) -> ScaledRating {
        self.fixed
    }

    /// Rating the open period would close to if volatility stayed unchanged
    pub fn provisional(&self) -> Rating {
        self.close_with(self.fixed.sigma).to_rating()
    }

    /// Reflect one result in the period's estimates.
    ///
    /// Fails with `InvalidScore` (state unchanged) when `score` is outside
    /// [0, 1].
    pub fn apply_match(&mut self, opponent: &Rating, score: f64) -> Result<()> {
        if !is_valid_score(score) {
            return Err(RatingError::InvalidScore { score });
        }

        let opponent = opponent.to_scale();
        let weight = g(opponent.phi);
        let expected = expected_score(self.fixed.mu, opponent.mu, opponent.phi);

        let residual = self.improvement * self.accuracy + weight * (score - expected);
        let accuracy = self.accuracy + weight * weight * expected * (1.0 - expected);

        let improvement = residual / accuracy;
        // A saturated expectation carries no information
        if accuracy > 0.0 && solvable(self.fixed.phi, accuracy, improvement) {
            self.accuracy = accuracy;
            self.improvement = improvement;
        } else {
            debug!(score, expected, "Skipped saturated match result");
        }

        trace!(
            score,
            expected,
            accuracy = self.accuracy,
            improvement = self.improvement,
            "Applied match to estimate"
        );
        Ok(())
    }

    /// Close the rating period and commit the new rating.
    ///
    /// Without pending matches only the deviation grows (toward the ceiling).
    /// Fails with `InvalidParameter` (state unchanged) unless `tau > 0`.
    pub fn fix(&mut self, tau: f64) -> Result<()> {
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(RatingError::invalid_parameter(format!(
                "tau must be a nonzero positive number, got {}",
                tau
            )));
        }

        let sigma = if self.has_pending() {
            VolatilitySolver::new(&self.fixed, self.accuracy, self.improvement, tau)?.solve()?
        } else {
            self.fixed.sigma
        };

        let next = self.close_with(sigma);
        debug!(
            pending = self.has_pending(),
            mu = next.mu,
            phi = next.phi,
            sigma = next.sigma,
            "Closed rating period"
        );

        self.fixed = next;
        self.tau = tau;
        self.accuracy = 0.0;
        self.improvement = 0.0;
        Ok(())
    }

    /// Steps 6 to 8 of Glicko-2 with the given new volatility
    fn close_with(&self, sigma: f64) -> ScaledRating {
        let phi_star = self.fixed.phi.hypot(sigma);

        if !self.has_pending() {
            return ScaledRating::new(self.fixed.mu, phi_star.min(PHI_CEILING), self.fixed.sigma);
        }

        let phi = (1.0 / (1.0 / (phi_star * phi_star) + self.accuracy))
            .sqrt()
            .min(PHI_CEILING);
        let mu = self.fixed.mu + phi * phi * self.improvement * self.accuracy;
        ScaledRating::new(mu, phi, sigma)
    }
}

impl Rating {
    /// Rate one full period in a single call.
    ///
    /// `opponents[i]` was met with `scores[i]`. Fails with `LengthMismatch`
    /// when the slices differ in length.
    pub fn update(&self, opponents: &[Rating], scores: &[f64], tau: f64) -> Result<Rating> {
        if opponents.len() != scores.len() {
            return Err(RatingError::LengthMismatch {
                opponents: opponents.len(),
                scores: scores.len(),
            });
        }

        self.rate_period(opponents.iter().zip(scores.iter().copied()), tau)
    }

    /// `update` taking the results as pairs
    pub fn update_with(&self, results: &[MatchResult], tau: f64) -> Result<Rating> {
        self.rate_period(
            results.iter().map(|result| (&result.opponent, result.score)),
            tau,
        )
    }

    fn rate_period<'a, I>(&self, results: I, tau: f64) -> Result<Rating>
    where
        I: IntoIterator<Item = (&'a Rating, f64)>,
    {
        let mut state = EstimationState::new(*self);
        for (opponent, score) in results {
            state.apply_match(opponent, score)?;
        }
        state.fix(tau)?;
        Ok(state.rating())
    }
}
