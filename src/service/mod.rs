//! Service layer for the rating engine
//!
//! This module binds a validated configuration and a time source to the
//! competitor and match operations.

pub mod clock;
pub mod engine;

pub use clock::{Clock, SystemClock};
pub use engine::RatingService;
