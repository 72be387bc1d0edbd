//! Multi-participant matches scored as a round robin
//!
//! Every participant is scored against every other one: a higher result value
//! wins, a lower one loses and equal values draw. All pairwise comparisons use
//! the ratings snapshotted after the overdue periods are closed and before any
//! participant is updated, so the outcome does not depend on entry order.

use crate::competitor::sealed::Sealed;
use crate::competitor::{validate_period_parameters, Competitor};
use crate::error::{RatingError, Result};
use crate::rating::Rating;
use crate::types::{pairwise_score, CompetitorId};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

struct Entry<'a> {
    participant: &'a mut dyn Competitor,
    result: f64,
}

/// A single match event between two or more participants
pub struct Match<'a> {
    played_at: DateTime<Utc>,
    entries: Vec<Entry<'a>>,
}

impl<'a> Match<'a> {
    /// Start a match played at `played_at`
    pub fn new(played_at: DateTime<Utc>) -> Self {
        Self {
            played_at,
            entries: Vec::new(),
        }
    }

    /// Add a participant with its result value (builder form)
    pub fn join(mut self, participant: &'a mut dyn Competitor, result: f64) -> Self {
        self.push(participant, result);
        self
    }

    /// Add a participant with its result value
    pub fn push(&mut self, participant: &'a mut dyn Competitor, result: f64) {
        self.entries.push(Entry {
            participant,
            result,
        });
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add `delta` to the result of the participant called `name`
    pub fn add_score(&mut self, name: &str, delta: f64) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.participant.name() == name)
            .ok_or_else(|| RatingError::UnknownParticipant {
                name: name.to_string(),
            })?;
        entry.result += delta;
        Ok(())
    }

    /// Set every result back to zero
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.result = 0.0;
        }
    }

    /// Result value of each participant, in entry order
    pub fn scores(&self) -> Vec<(CompetitorId, f64)> {
        self.entries
            .iter()
            .map(|entry| (entry.participant.name().to_string(), entry.result))
            .collect()
    }

    /// Current rating of each participant, in entry order
    pub fn ratings(&self) -> Vec<(CompetitorId, Rating)> {
        self.entries
            .iter()
            .map(|entry| (entry.participant.name().to_string(), entry.participant.rating()))
            .collect()
    }

    /// Probability of each participant beating every other one
    pub fn win_probabilities(&self) -> Vec<(CompetitorId, f64)> {
        let ratings = self.ratings();
        ratings
            .iter()
            .enumerate()
            .map(|(i, (name, rating))| {
                let probability: f64 = ratings
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, (_, opponent))| rating.win_probability(opponent))
                    .product();
                (name.clone(), probability)
            })
            .collect()
    }

    /// Apply the match to every participant.
    ///
    /// Overdue rating periods are closed first, then each participant is
    /// scored against every other one's pre-match rating. Everything that can
    /// be rejected, period closes included, is checked before any participant
    /// is touched.
    pub fn apply(mut self, period: Duration, tau: f64) -> Result<()> {
        self.validate(period, tau)?;

        // Close overdue periods for everyone or for no one
        let mut staged = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            staged.push(entry.participant.stage_prepare(self.played_at, period, tau)?);
        }
        for (entry, closes) in self.entries.iter_mut().zip(staged) {
            entry.participant.commit_prepare(closes);
        }

        let snapshots: Vec<Rating> = self
            .entries
            .iter()
            .map(|entry| entry.participant.rating())
            .collect();
        let results: Vec<f64> = self.entries.iter().map(|entry| entry.result).collect();

        for (i, entry) in self.entries.iter_mut().enumerate() {
            for (j, opponent) in snapshots.iter().enumerate() {
                if i == j {
                    continue;
                }
                let score = pairwise_score(results[i], results[j]);
                entry.participant.apply_match(opponent, score)?;
            }
        }

        debug!(
            participants = self.entries.len(),
            played_at = %self.played_at,
            "Applied match"
        );
        Ok(())
    }

    fn validate(&self, period: Duration, tau: f64) -> Result<()> {
        if self.entries.len() < 2 {
            return Err(RatingError::invalid_match(format!(
                "two or more participants are required, got {}",
                self.entries.len()
            )));
        }
        validate_period_parameters(period, tau)?;

        for entry in &self.entries {
            if !entry.result.is_finite() {
                return Err(RatingError::invalid_match(format!(
                    "result of {} is not a finite number",
                    entry.participant.name()
                )));
            }

            let fixed_at = entry.participant.fixed_at();
            if self.played_at < fixed_at {
                warn!(
                    participant = entry.participant.name(),
                    played_at = %self.played_at,
                    %fixed_at,
                    "Rejected match from a closed rating period"
                );
                return Err(RatingError::StaleMatch {
                    event_time: self.played_at,
                    fixed_at,
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("played_at", &self.played_at)
            .field("scores", &self.scores())
            .finish()
    }
}
