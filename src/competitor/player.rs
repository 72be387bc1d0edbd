//! Individual rated player with rating-period bookkeeping

use crate::competitor::sealed::{PeriodClose, Sealed};
use crate::competitor::{validate_period_parameters, Competitor};
use crate::error::{RatingError, Result};
use crate::rating::{EstimationState, Rating};
use crate::types::{CompetitorId, SCORE_DRAW, SCORE_LOSS, SCORE_WIN};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Win/loss/draw tally of a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCount {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

impl GameCount {
    /// Count a score; graded scores are not tallied
    pub fn record(&mut self, score: f64) {
        if score == SCORE_WIN {
            self.wins += 1;
        } else if score == SCORE_LOSS {
            self.losses += 1;
        } else if score == SCORE_DRAW {
            self.draws += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.wins + self.losses + self.draws
    }
}

impl std::fmt::Display for GameCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}/{}/{})", self.wins, self.losses, self.draws)
    }
}

/// A player: an estimation state plus the start of its open rating period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: CompetitorId,
    estimation: EstimationState,
    fixed_at: DateTime<Utc>,
    games: GameCount,
}

impl Player {
    /// Create a player whose open period starts at `fixed_at`
    pub fn new(name: impl Into<CompetitorId>, rating: Rating, fixed_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            estimation: EstimationState::new(rating),
            fixed_at,
            games: GameCount::default(),
        }
    }

    pub fn estimation(&self) -> &EstimationState {
        &self.estimation
    }

    pub fn games(&self) -> GameCount {
        self.games
    }

    /// Rating the open period would close to, pending matches included
    pub fn provisional_rating(&self) -> Rating {
        self.estimation.provisional()
    }
}

impl Competitor for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn rating(&self) -> Rating {
        self.estimation.rating()
    }

    fn fixed_at(&self) -> DateTime<Utc> {
        self.fixed_at
    }

    fn apply_match(&mut self, opponent: &Rating, score: f64) -> Result<()> {
        self.estimation.apply_match(opponent, score)?;
        self.games.record(score);
        Ok(())
    }
}

impl Sealed for Player {
    fn stage_prepare(
        &self,
        event_time: DateTime<Utc>,
        period: Duration,
        tau: f64,
    ) -> Result<Vec<PeriodClose>> {
        validate_period_parameters(period, tau)?;
        if event_time < self.fixed_at {
            warn!(
                player = %self.name,
                %event_time,
                fixed_at = %self.fixed_at,
                "Rejected match from a closed rating period"
            );
            return Err(RatingError::StaleMatch {
                event_time,
                fixed_at: self.fixed_at,
            });
        }

        let mut estimation = self.estimation.clone();
        let mut fixed_at = self.fixed_at;
        let mut closed = 0u64;
        while event_time - fixed_at > period {
            let next = fixed_at.checked_add_signed(period).ok_or_else(|| {
                RatingError::invalid_parameter("rating period moves past the supported time range")
            })?;
            estimation.fix(tau)?;
            fixed_at = next;
            closed += 1;
        }

        Ok(vec![PeriodClose {
            estimation,
            fixed_at,
            closed,
        }])
    }

    fn commit_prepare(&mut self, closes: Vec<PeriodClose>) {
        let Some(close) = closes.into_iter().next() else {
            return;
        };
        self.estimation = close.estimation;
        self.fixed_at = close.fixed_at;

        if close.closed > 0 {
            debug!(
                player = %self.name,
                closed = close.closed,
                fixed_at = %self.fixed_at,
                "Closed elapsed rating periods"
            );
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}{}", self.name, self.rating(), self.games)
    }
}
