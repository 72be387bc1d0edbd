//! Error types for the rating engine
//!
//! Every failure is reported synchronously as a typed `RatingError`; a rejected
//! call leaves the state it was invoked on untouched.

use chrono::{DateTime, Utc};

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RatingError>;

/// Errors raised by the rating engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid score {score}: must be within 0 to 1 (win = 1, loss = 0, draw = 0.5)")]
    InvalidScore { score: f64 },

    #[error("Opponents and scores length mismatch: {opponents} opponents, {scores} scores")]
    LengthMismatch { opponents: usize, scores: usize },

    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Volatility solver did not converge during {stage} after {iterations} iterations")]
    SolverNonConvergence {
        stage: &'static str,
        iterations: usize,
    },

    #[error("Stale match at {event_time}: competitor already fixed at {fixed_at}")]
    StaleMatch {
        event_time: DateTime<Utc>,
        fixed_at: DateTime<Utc>,
    },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Participant not found in match: {name}")]
    UnknownParticipant { name: String },
}

impl RatingError {
    /// Shorthand for an `InvalidParameter` error
    pub(crate) fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Shorthand for an `InvalidMatch` error
    pub(crate) fn invalid_match(reason: impl Into<String>) -> Self {
        Self::InvalidMatch {
            reason: reason.into(),
        }
    }
}
