//! Configuration management for the rating engine
//!
//! This module handles configuration loading from environment variables and
//! TOML, validation, and default values.

pub mod rating;

// Re-export commonly used types
pub use rating::{
    validate_config, RatingConfig, PERIOD_DAY, PERIOD_MONTH, PERIOD_WEEK, PERIOD_YEAR,
};
