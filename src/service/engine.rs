//! Rating service bound to one configuration
//!
//! The service owns the rating period, tau and initial volatility so callers
//! create competitors and apply matches without repeating them.

use crate::competitor::{Competitor, Player, Team};
use crate::config::{validate_config, RatingConfig};
use crate::error::Result;
use crate::matchup::{HeadToHead, Match};
use crate::rating::Rating;
use crate::service::clock::{Clock, SystemClock};
use crate::types::{CompetitorId, Side};
use crate::utils::truncate_to_period;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

/// Creates competitors and applies matches with a fixed configuration
#[derive(Debug)]
pub struct RatingService<C: Clock = SystemClock> {
    config: RatingConfig,
    initial_volatility: f64,
    clock: C,
}

impl RatingService<SystemClock> {
    /// Create a service using wall-clock time
    pub fn new(config: RatingConfig) -> anyhow::Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> RatingService<C> {
    /// Create a service with a custom time source
    pub fn with_clock(config: RatingConfig, clock: C) -> anyhow::Result<Self> {
        validate_config(&config)?;
        let initial_volatility = config.initial_volatility();

        info!(
            period_seconds = config.rating_period_seconds,
            tau = config.tau,
            initial_volatility,
            "Rating service configured"
        );

        Ok(Self {
            config,
            initial_volatility,
            clock,
        })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn rating_period(&self) -> Duration {
        self.config.rating_period()
    }

    pub fn tau(&self) -> f64 {
        self.config.tau
    }

    /// Volatility given to new competitors
    pub fn initial_volatility(&self) -> f64 {
        self.initial_volatility
    }

    /// Rating of a brand-new competitor
    pub fn default_rating(&self) -> Rating {
        Rating::default_with_volatility(self.initial_volatility)
    }

    /// Create a player whose first period starts at the period boundary at or
    /// before `created_at`
    pub fn new_player(
        &self,
        name: impl Into<CompetitorId>,
        rating: Rating,
        created_at: DateTime<Utc>,
    ) -> Result<Player> {
        let fixed_at = truncate_to_period(created_at, self.rating_period())?;
        let player = Player::new(name, rating, fixed_at);
        debug!(player = %player, %fixed_at, "Created player");
        Ok(player)
    }

    /// Create a new player with the default rating, starting now
    pub fn new_default_player(&self, name: impl Into<CompetitorId>) -> Result<Player> {
        self.new_player(name, self.default_rating(), self.clock.now())
    }

    pub fn new_team(&self, name: impl Into<CompetitorId>, members: Vec<Player>) -> Result<Team> {
        Team::new(name, members)
    }

    /// Start a match played now
    pub fn new_match<'a>(&self) -> Match<'a> {
        Match::new(self.clock.now())
    }

    /// Start a head-to-head match played now
    pub fn new_head_to_head<'a>(
        &self,
        left: &'a mut dyn Competitor,
        right: &'a mut dyn Competitor,
        winner: Option<Side>,
    ) -> HeadToHead<'a> {
        HeadToHead::new(left, right, winner, self.clock.now())
    }

    pub fn apply_match(&self, game: Match<'_>) -> Result<()> {
        game.apply(self.rating_period(), self.config.tau)
    }

    pub fn apply_head_to_head(&self, game: HeadToHead<'_>) -> Result<()> {
        game.apply(self.rating_period(), self.config.tau)
    }
}
