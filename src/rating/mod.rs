//! Glicko-2 rating engine
//!
//! This module provides the scale conversion, the pairwise estimators, the
//! volatility solver and the online accumulator that closes rating periods.

pub mod compare;
pub mod estimation;
pub mod estimator;
pub mod scale;
pub mod solver;

// Re-export commonly used types
pub use estimation::{EstimationState, MatchResult};
pub use scale::{
    initial_volatility, Rating, ScaledRating, DEFAULT_TAU, DEFAULT_VOLATILITY,
    INITIAL_DEVIATION, INITIAL_STRENGTH, SCALE_FACTOR,
};
pub use solver::VolatilitySolver;
