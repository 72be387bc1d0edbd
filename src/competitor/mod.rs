//! Rated participants: individual players and teams of players
//!
//! Both kinds expose the same narrow capability through `Competitor`, which is
//! all a match needs to rate them.

pub mod player;
pub mod team;

// Re-export commonly used types
pub use player::{GameCount, Player};
pub use team::{aggregate, Team};

use crate::error::{RatingError, Result};
use crate::rating::Rating;
use chrono::{DateTime, Duration, Utc};

pub(crate) mod sealed {
    use crate::error::Result;
    use crate::rating::EstimationState;
    use chrono::{DateTime, Duration, Utc};

    /// A player's state after closing its elapsed periods, not yet committed
    #[derive(Debug, Clone)]
    pub struct PeriodClose {
        pub estimation: EstimationState,
        pub fixed_at: DateTime<Utc>,
        pub closed: u64,
    }

    /// Two-phase period closing, restricted to the participant kinds of
    /// this crate
    pub trait Sealed {
        /// Compute every period close up to `event_time` without mutating
        fn stage_prepare(
            &self,
            event_time: DateTime<Utc>,
            period: Duration,
            tau: f64,
        ) -> Result<Vec<PeriodClose>>;

        /// Commit the closes returned by `stage_prepare`
        fn commit_prepare(&mut self, closes: Vec<PeriodClose>);
    }
}

/// A participant whose rating can be read and updated by a match.
///
/// Implemented by `Player` and `Team` only:
///
/// ```compile_fail
/// use chrono::{DateTime, Utc};
/// use glicko_period::competitor::Competitor;
/// use glicko_period::rating::Rating;
///
/// struct Ghost;
///
/// impl Competitor for Ghost {
///     fn name(&self) -> &str {
///         "ghost"
///     }
///     fn rating(&self) -> Rating {
///         Rating::default()
///     }
///     fn fixed_at(&self) -> DateTime<Utc> {
///         DateTime::<Utc>::MIN_UTC
///     }
///     fn apply_match(&mut self, _: &Rating, _: f64) -> glicko_period::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Competitor: sealed::Sealed + Send {
    /// Display name of the participant
    fn name(&self) -> &str;

    /// Current rating used when others are scored against this participant
    fn rating(&self) -> Rating;

    /// Start of the participant's open rating period
    fn fixed_at(&self) -> DateTime<Utc>;

    /// Reflect one result against an opponent's rating
    fn apply_match(&mut self, opponent: &Rating, score: f64) -> Result<()>;

    /// Close every rating period that ended before `event_time`.
    ///
    /// On error nothing has been closed.
    fn prepare(&mut self, event_time: DateTime<Utc>, period: Duration, tau: f64) -> Result<()> {
        let closes = self.stage_prepare(event_time, period, tau)?;
        self.commit_prepare(closes);
        Ok(())
    }
}

/// Validate the period-close parameters shared by every participant kind
pub(crate) fn validate_period_parameters(period: Duration, tau: f64) -> Result<()> {
    if period <= Duration::zero() {
        return Err(RatingError::invalid_parameter(format!(
            "rating period must be positive, got {}",
            period
        )));
    }
    if !(tau > 0.0 && tau.is_finite()) {
        return Err(RatingError::invalid_parameter(format!(
            "tau must be a nonzero positive number, got {}",
            tau
        )));
    }
    Ok(())
}

/// A player whose pending estimates overflow the volatility equation, as
/// only a corrupted saved state can be
#[cfg(test)]
pub(crate) fn unsolvable_player(name: &str, fixed_at: DateTime<Utc>) -> Player {
    let mut value = serde_json::to_value(Player::new(name, Rating::default(), fixed_at))
        .expect("player serializes");
    value["estimation"]["accuracy"] = serde_json::json!(7.47e-247);
    value["estimation"]["improvement"] = serde_json::json!(1.34e246);
    serde_json::from_value(value).expect("player deserializes")
}
