//! Glicko Period - Glicko-2 rating engine with rating periods
//!
//! This crate provides an online Glicko-2 estimator that accumulates match
//! results as they arrive, closes rating periods on schedule, and rates teams
//! through an aggregate of their members.

pub mod competitor;
pub mod config;
pub mod error;
pub mod matchup;
pub mod rating;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use competitor::{Competitor, Player, Team};
pub use config::RatingConfig;
pub use matchup::{HeadToHead, Match};
pub use rating::{EstimationState, MatchResult, Rating, ScaledRating};
pub use service::{Clock, RatingService, SystemClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
