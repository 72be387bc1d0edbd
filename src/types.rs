//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};

/// Name identifying a player or team
pub type CompetitorId = String;

/// Score when winning against an opponent
pub const SCORE_WIN: f64 = 1.0;

/// Score when losing to an opponent
pub const SCORE_LOSS: f64 = 0.0;

/// Score when drawing with an opponent
pub const SCORE_DRAW: f64 = 0.5;

/// Side of a two-participant match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other side of the match
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Check that a score lies within the closed interval [0, 1]
pub fn is_valid_score(score: f64) -> bool {
    (SCORE_LOSS..=SCORE_WIN).contains(&score)
}

/// Score of `result` measured against `opponent_result` (higher wins)
pub fn pairwise_score(result: f64, opponent_result: f64) -> f64 {
    if result > opponent_result {
        SCORE_WIN
    } else if result < opponent_result {
        SCORE_LOSS
    } else {
        SCORE_DRAW
    }
}
