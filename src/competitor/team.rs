//! Teams of players rated as one participant
//!
//! A team's rating is derived from its members on every read and match
//! results are fanned out to every member, each against the opponent's
//! rating at match time.

use crate::competitor::sealed::{PeriodClose, Sealed};
use crate::competitor::{validate_period_parameters, Competitor, Player};
use crate::error::{RatingError, Result};
use crate::rating::{Rating, ScaledRating};
use crate::types::{is_valid_score, CompetitorId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Composite rating of a group.
///
/// On the internal scale: mean `mu`, `phi = sqrt(Σ phi²) / n` and mean
/// `sigma`. Returns `None` for an empty group.
pub fn aggregate<I>(ratings: I) -> Option<Rating>
where
    I: IntoIterator<Item = Rating>,
{
    let mut count = 0usize;
    let mut total_mu = 0.0;
    let mut total_sq_phi = 0.0;
    let mut total_sigma = 0.0;

    for rating in ratings {
        let scaled = rating.to_scale();
        total_mu += scaled.mu;
        total_sq_phi += scaled.phi * scaled.phi;
        total_sigma += scaled.sigma;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(ScaledRating::new(total_mu / n, total_sq_phi.sqrt() / n, total_sigma / n).to_rating())
}

/// An ordered group of players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    name: CompetitorId,
    members: Vec<Player>,
}

impl Team {
    /// Create a team; at least one member is required
    pub fn new(name: impl Into<CompetitorId>, members: Vec<Player>) -> Result<Self> {
        let name = name.into();
        if members.is_empty() {
            return Err(RatingError::invalid_match(format!(
                "team {} has no members",
                name
            )));
        }
        Ok(Self { name, members })
    }

    pub fn members(&self) -> &[Player] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Player] {
        &mut self.members
    }

    /// Look up a member by name
    pub fn member(&self, name: &str) -> Option<&Player> {
        self.members.iter().find(|member| member.name() == name)
    }

    /// Hand the members back to the caller
    pub fn into_members(self) -> Vec<Player> {
        self.members
    }
}

impl Competitor for Team {
    fn name(&self) -> &str {
        &self.name
    }

    fn rating(&self) -> Rating {
        // Members are never empty, see `Team::new`
        aggregate(self.members.iter().map(Competitor::rating)).unwrap_or_default()
    }

    fn fixed_at(&self) -> DateTime<Utc> {
        self.members
            .iter()
            .map(Competitor::fixed_at)
            .max()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn apply_match(&mut self, opponent: &Rating, score: f64) -> Result<()> {
        if !is_valid_score(score) {
            return Err(RatingError::InvalidScore { score });
        }
        for member in &mut self.members {
            member.apply_match(opponent, score)?;
        }
        Ok(())
    }
}

impl Sealed for Team {
    fn stage_prepare(
        &self,
        event_time: DateTime<Utc>,
        period: Duration,
        tau: f64,
    ) -> Result<Vec<PeriodClose>> {
        validate_period_parameters(period, tau)?;

        let fixed_at = self.fixed_at();
        if event_time < fixed_at {
            warn!(
                team = %self.name,
                %event_time,
                %fixed_at,
                "Rejected match from a closed rating period"
            );
            return Err(RatingError::StaleMatch {
                event_time,
                fixed_at,
            });
        }

        let mut closes = Vec::with_capacity(self.members.len());
        for member in &self.members {
            closes.extend(member.stage_prepare(event_time, period, tau)?);
        }
        Ok(closes)
    }

    fn commit_prepare(&mut self, closes: Vec<PeriodClose>) {
        for (member, close) in self.members.iter_mut().zip(closes) {
            member.commit_prepare(vec![close]);
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{{", self.name)?;
        for member in &self.members {
            write!(f, " {}", member)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SCORE_LOSS, SCORE_WIN};
    use chrono::TimeZone;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 5, 1, 0, 0, 0).unwrap()
    }

    fn create_test_team() -> Team {
        Team::new(
            "bovidae",
            vec![
                Player::new("sheep", Rating::new(1700.0, 50.0, 0.2), base_time()),
                Player::new("goat", Rating::new(1500.0, 350.0, 0.2), base_time()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_identical_members_aggregate() {
        let member = Rating::new(1600.0, 120.0, 0.06);
        let team = aggregate([member, member]).unwrap();

        assert!((team.strength() - 1600.0).abs() < 1e-9);
        assert!((team.deviation() - 120.0 / 2f64.sqrt()).abs() < 1e-9);
        assert!((team.volatility() - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_mixed_members() {
        let team = aggregate([
            Rating::new(1700.0, 50.0, 0.2),
            Rating::new(1500.0, 350.0, 0.1),
        ])
        .unwrap();

        assert!((team.strength() - 1600.0).abs() < 1e-9);
        let expected = (50.0f64 * 50.0 + 350.0 * 350.0).sqrt() / 2.0;
        assert!((team.deviation() - expected).abs() < 1e-9);
        assert!((team.volatility() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(std::iter::empty()).is_none());
    }

    #[test]
    fn test_empty_team_rejected() {
        let result = Team::new("nobody", vec![]);
        assert!(matches!(result, Err(RatingError::InvalidMatch { .. })));
    }

    #[test]
    fn test_rating_follows_members() {
        let mut team = create_test_team();
        let before = team.rating();

        let opponent = Rating::new(1400.0, 100.0, 0.2);
        team.apply_match(&opponent, SCORE_WIN).unwrap();
        team.prepare(base_time() + Duration::days(8), Duration::weeks(1), 0.5)
            .unwrap();

        assert!(team.rating().strength() > before.strength());
    }

    #[test]
    fn test_fan_out_to_every_member() {
        let mut team = create_test_team();
        let opponent = Rating::new(1400.0, 100.0, 0.2);
        team.apply_match(&opponent, SCORE_LOSS).unwrap();

        for member in team.members() {
            assert!(member.estimation().has_pending());
            assert_eq!(member.games().losses, 1);
        }
    }

    #[test]
    fn test_invalid_score_not_fanned_out() {
        let mut team = create_test_team();
        let result = team.apply_match(&Rating::default(), -1.0);

        assert!(matches!(result, Err(RatingError::InvalidScore { .. })));
        assert!(team
            .members()
            .iter()
            .all(|member| !member.estimation().has_pending()));
    }

    #[test]
    fn test_stale_member_blocks_prepare() {
        let mut team = Team::new(
            "equidae",
            vec![
                Player::new("donkey", Rating::default(), base_time()),
                Player::new("zebra", Rating::default(), base_time() + Duration::weeks(2)),
            ],
        )
        .unwrap();
        let before = team.clone();

        let result = team.prepare(base_time() + Duration::weeks(1), Duration::weeks(1), 0.5);
        assert!(matches!(result, Err(RatingError::StaleMatch { .. })));
        assert_eq!(team, before);
    }

    #[test]
    fn test_failing_member_leaves_team_untouched() {
        let mut team = Team::new(
            "bovidae",
            vec![
                Player::new("sheep", Rating::new(1700.0, 50.0, 0.2), base_time()),
                crate::competitor::unsolvable_player("goat", base_time()),
            ],
        )
        .unwrap();
        team.members_mut()[0]
            .apply_match(&Rating::new(1400.0, 100.0, 0.2), SCORE_WIN)
            .unwrap();
        let before = team.clone();

        let result = team.prepare(base_time() + Duration::weeks(2), Duration::weeks(1), 0.5);
        assert!(result.is_err());
        assert_eq!(team, before);
        assert!(team.members()[0].estimation().has_pending());
    }

    #[test]
    fn test_member_lookup() {
        let team = create_test_team();
        assert!(team.member("goat").is_some());
        assert!(team.member("horse").is_none());
        assert_eq!(team.fixed_at(), base_time());
        assert_eq!(team.into_members().len(), 2);
    }
}
