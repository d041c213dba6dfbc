//! Matchmaking search over candidate team splits
//!
//! Ranks team compositions drawn from a player pool by the rating
//! engine's predicted fairness.

pub mod search;

// Re-export commonly used types
pub use search::{
    combinations, MatchmakingSearch, ScoredMatchup, ScoredOpponents, SearchConfig,
};
