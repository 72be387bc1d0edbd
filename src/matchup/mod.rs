//! Applying match outcomes to participants
//!
//! This module turns relative results into per-opponent scores and drives the
//! period scheduling and accumulation of every participant.

pub mod head_to_head;
pub mod round_robin;

// Re-export commonly used types
pub use head_to_head::HeadToHead;
pub use round_robin::Match;
