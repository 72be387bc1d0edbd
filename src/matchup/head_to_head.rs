//! Two-participant matches with an optional winner

use crate::competitor::Competitor;
use crate::error::Result;
use crate::matchup::round_robin::Match;
use crate::types::{Side, SCORE_DRAW, SCORE_LOSS, SCORE_WIN};
use chrono::{DateTime, Duration, Utc};

/// A match between a left and a right participant. No winner is a draw.
pub struct HeadToHead<'a> {
    pub left: &'a mut dyn Competitor,
    pub right: &'a mut dyn Competitor,
    pub winner: Option<Side>,
    pub played_at: DateTime<Utc>,
}

impl<'a> HeadToHead<'a> {
    pub fn new(
        left: &'a mut dyn Competitor,
        right: &'a mut dyn Competitor,
        winner: Option<Side>,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            left,
            right,
            winner,
            played_at,
        }
    }

    /// Scores of the left and right participant
    pub fn scores(&self) -> (f64, f64) {
        match self.winner {
            Some(Side::Left) => (SCORE_WIN, SCORE_LOSS),
            Some(Side::Right) => (SCORE_LOSS, SCORE_WIN),
            None => (SCORE_DRAW, SCORE_DRAW),
        }
    }

    /// Apply one comparison per side, both against pre-match ratings
    pub fn apply(self, period: Duration, tau: f64) -> Result<()> {
        let (left_score, right_score) = self.scores();
        Match::new(self.played_at)
            .join(self.left, left_score)
            .join(self.right, right_score)
            .apply(period, tau)
    }
}
