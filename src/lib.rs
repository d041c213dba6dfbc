//! Matchpoint - skill rating and fair matchup recommendations
//!
//! This crate maintains probabilistic skill estimates for players in a
//! competitive game and recommends balanced matchups between teams. It
//! provides closed-form TrueSkill two-team rating updates, win and draw
//! probability estimation, and a combinatorial search that ranks team
//! splits from a small player pool by predicted fairness.

pub mod error;
pub mod matchmaking;
pub mod rating;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used types and traits
pub use error::{MatchmakingError, Result};
pub use types::*;

// Re-export key components
pub use matchmaking::{MatchmakingSearch, ScoredMatchup, ScoredOpponents, SearchConfig};
pub use rating::{InMemoryPlayerStore, PlayerStore, TrueSkillConfig, TrueSkillEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
